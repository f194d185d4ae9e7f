/// Rule-set used by the binary when none is given on the command line
pub const DEFAULT_RULESET_PATH: &str = "configs/skill-damage.yaml";
/// Event budget applied by the binary when the rule-set sets none
pub const DEFAULT_MAX_EVENTS: usize = 10_000;
