use crate::error::RuleSetError;

pub const MIN_NUMBERS: u16 = 2;
pub const MAX_NUMBERS: u16 = 26;
pub const MIN_REPEATS: u16 = 1;
pub const MAX_REPEATS: u16 = 4;
pub const MIN_COLOURS: u16 = 2;
pub const MAX_COLOURS: u16 = 8;
pub const MIN_JOKERS: u16 = 0;
pub const MAX_JOKERS: u16 = 4;
pub const MIN_SET_LEN: u16 = 2;
pub const MAX_SET_LEN: u16 = 6;
pub const MIN_INITIAL_VALUE: u16 = 1;
pub const MAX_INITIAL_VALUE: u16 = 50;

/// Parameters of a generalized Rummikub rule set.
///
/// Validated once at [`crate::RuleSet::new`] construction time; every other
/// component in this crate trusts these bounds without re-checking them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSetConfig {
    pub numbers: u16,
    pub repeats: u16,
    pub colours: u16,
    pub jokers: u16,
    pub min_len: u16,
    pub min_initial_value: u16,
}

impl RuleSetConfig {
    /// The standard Rummikub rule set: 13 numbers, 2 repeats, 4 colours,
    /// 2 jokers, minimum set length 3, minimum initial meld value 30.
    pub fn standard() -> Self {
        Self {
            numbers: 13,
            repeats: 2,
            colours: 4,
            jokers: 2,
            min_len: 3,
            min_initial_value: 30,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), RuleSetError> {
        let Self {
            numbers,
            repeats,
            colours,
            jokers,
            min_len,
            min_initial_value,
        } = *self;

        if !(MIN_NUMBERS..=MAX_NUMBERS).contains(&numbers) {
            return Err(RuleSetError::InvalidConfig(format!(
                "numbers must be in [{MIN_NUMBERS}, {MAX_NUMBERS}], got {numbers}"
            )));
        }
        if !(MIN_REPEATS..=MAX_REPEATS).contains(&repeats) {
            return Err(RuleSetError::InvalidConfig(format!(
                "repeats must be in [{MIN_REPEATS}, {MAX_REPEATS}], got {repeats}"
            )));
        }
        if !(MIN_COLOURS..=MAX_COLOURS).contains(&colours) {
            return Err(RuleSetError::InvalidConfig(format!(
                "colours must be in [{MIN_COLOURS}, {MAX_COLOURS}], got {colours}"
            )));
        }
        if !(MIN_JOKERS..=MAX_JOKERS).contains(&jokers) {
            return Err(RuleSetError::InvalidConfig(format!(
                "jokers must be in [{MIN_JOKERS}, {MAX_JOKERS}], got {jokers}"
            )));
        }
        if !(MIN_SET_LEN..=MAX_SET_LEN).contains(&min_len) {
            return Err(RuleSetError::InvalidConfig(format!(
                "min_len must be in [{MIN_SET_LEN}, {MAX_SET_LEN}], got {min_len}"
            )));
        }
        if !(MIN_INITIAL_VALUE..=MAX_INITIAL_VALUE).contains(&min_initial_value) {
            return Err(RuleSetError::InvalidConfig(format!(
                "min_initial_value must be in [{MIN_INITIAL_VALUE}, {MAX_INITIAL_VALUE}], got {min_initial_value}"
            )));
        }
        if min_len > colours {
            return Err(RuleSetError::InvalidConfig(format!(
                "min_len ({min_len}) cannot exceed colours ({colours}): groups would be impossible"
            )));
        }
        if min_len > numbers {
            return Err(RuleSetError::InvalidConfig(format!(
                "min_len ({min_len}) cannot exceed numbers ({numbers}): runs would be impossible"
            )));
        }
        Ok(())
    }

    /// Short string uniquely identifying tile-compatible game states: a
    /// snapshot may be restored into any rule set sharing this key, since
    /// `min_len` and `min_initial_value` don't affect what tiles exist.
    pub fn game_state_key(&self) -> String {
        format!(
            "n{}r{}c{}j{}",
            self.numbers, self.repeats, self.colours, self.jokers
        )
    }
}

impl Default for RuleSetConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_config_is_valid() {
        assert!(RuleSetConfig::standard().validate().is_ok());
    }

    #[test]
    fn test_min_len_exceeds_colours_rejected() {
        let cfg = RuleSetConfig {
            min_len: 5,
            colours: 4,
            ..RuleSetConfig::standard()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_min_len_exceeds_numbers_rejected() {
        let cfg = RuleSetConfig {
            min_len: 4,
            numbers: 3,
            colours: 8,
            ..RuleSetConfig::standard()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_out_of_range_repeats_rejected() {
        let cfg = RuleSetConfig {
            repeats: 0,
            ..RuleSetConfig::standard()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_game_state_key_ignores_min_len_and_value() {
        let a = RuleSetConfig::standard();
        let b = RuleSetConfig {
            min_len: 4,
            min_initial_value: 40,
            ..a
        };
        assert_eq!(a.game_state_key(), b.game_state_key());
    }
}
