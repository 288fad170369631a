//! Keyboard input mapping
//!
//! Arrow keys arrive either as DOM-style key names or legacy key codes.

use crate::error::MazeError;
use crate::maze::Direction;

/// Direction for a key name such as `ArrowUp`
pub fn direction_for_key(name: &str) -> Option<Direction> {
    match name {
        "ArrowUp" => Some(Direction::Up),
        "ArrowRight" => Some(Direction::Right),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        _ => None,
    }
}

/// Direction for a legacy key code (37-40)
pub fn direction_for_key_code(code: u32) -> Option<Direction> {
    match code {
        38 => Some(Direction::Up),
        39 => Some(Direction::Right),
        40 => Some(Direction::Down),
        37 => Some(Direction::Left),
        _ => None,
    }
}

/// Parse a compact key script such as `"RRD, dl"`
///
/// Letters `U`, `R`, `D`, `L` in either case; whitespace and commas are skipped.
pub fn parse_key_script(script: &str) -> Result<Vec<Direction>, MazeError> {
    script
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c.to_ascii_uppercase() {
            'U' => Ok(Direction::Up),
            'R' => Ok(Direction::Right),
            'D' => Ok(Direction::Down),
            'L' => Ok(Direction::Left),
            other => Err(MazeError::invalid(format!(
                "unknown key `{}` in key script",
                other
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_and_codes_agree() {
        for (name, code) in [
            ("ArrowUp", 38),
            ("ArrowRight", 39),
            ("ArrowDown", 40),
            ("ArrowLeft", 37),
        ] {
            assert!(direction_for_key(name).is_some());
            assert_eq!(direction_for_key(name), direction_for_key_code(code));
        }
        assert_eq!(direction_for_key("Space"), None);
        assert_eq!(direction_for_key_code(32), None);
    }

    #[test]
    fn test_parse_key_script() {
        let keys = parse_key_script("Rr d,L u").unwrap();
        assert_eq!(
            keys,
            vec![
                Direction::Right,
                Direction::Right,
                Direction::Down,
                Direction::Left,
                Direction::Up
            ]
        );
        assert!(parse_key_script("").unwrap().is_empty());
        assert!(matches!(
            parse_key_script("RX"),
            Err(MazeError::InvalidConfiguration(_))
        ));
    }
}
