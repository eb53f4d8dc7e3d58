//! Text layout loader.
//!
//! ## Format
//!
//! Blank lines are skipped. The first `height` lines hold `width`
//! whitespace-separated 4-digit wall masks (`N W S E`, `1` = wall). The rest
//! is four sections in order, each running until a line no longer fits:
//!
//! - POIs: `row col v|f`
//! - Blazes: `row col`
//! - Doors: `row1 col1 row2 col2`
//! - Entrances: `row col`
//!
//! Coordinates are 1-based row/column pairs.

use super::{CellLayout, Scenario, ScenarioError};
use crate::board::PoiKind;
use crate::core::Position;

/// The stock 8x6 map.
pub const SAMPLE_LAYOUT: &str = "
1100 1000 1001 1100 1001 1100 1000 1001
0100 0000 0011 0110 0011 0110 0010 0011
0100 0001 1100 1000 1000 1001 1100 1001
0110 0011 0110 0010 0010 0011 0110 0011
1100 1000 1000 1000 1001 1100 1001 1101
0110 0010 0010 0010 0011 0110 0011 0111
2 4 v
5 2 f
5 7 v
1 2
2 3
3 4
3 5
4 5
5 6
1 3 1 4
2 5 2 6
2 8 3 8
3 2 3 3
4 4 5 4
4 6 4 7
6 5 6 6
6 7 6 8
1 6
3 1
4 8
6 3
";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Pois,
    Blazes,
    Doors,
    Entrances,
}

/// Parse a layout of the given size.
///
/// ```
/// use rescue_sim::scenario::parse_layout;
///
/// let text = "1100 1001\n0110 0011\n1 1 v\n2 2\n1 1 1 2\n1 2";
/// let scenario = parse_layout(text, 2, 2).unwrap();
/// assert_eq!(scenario.pois.len(), 1);
/// assert_eq!(scenario.blazes.len(), 1);
/// assert_eq!(scenario.doors.len(), 1);
/// assert_eq!(scenario.entrances.len(), 1);
/// ```
pub fn parse_layout(text: &str, width: u32, height: u32) -> Result<Scenario, ScenarioError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();

    if (lines.len() as u32) < height {
        return Err(ScenarioError::MissingWallRows {
            expected: height,
            found: lines.len() as u32,
        });
    }

    let mut scenario = Scenario::new(width, height);
    for (y, (_, line)) in lines.iter().take(height as usize).enumerate() {
        let masks: Vec<&str> = line.split_whitespace().collect();
        if masks.len() as u32 != width {
            return Err(ScenarioError::RowWidth {
                row: y as u32 + 1,
                expected: width,
                found: masks.len() as u32,
            });
        }
        for (x, mask) in masks.into_iter().enumerate() {
            let layout = parse_mask(mask).ok_or_else(|| ScenarioError::MalformedMask {
                row: y as u32 + 1,
                column: x as u32 + 1,
                mask: mask.to_string(),
            })?;
            scenario = scenario.with_cell(Position::new(x as u32, y as u32), layout);
        }
    }

    let mut section = Section::Pois;
    for &(number, line) in &lines[height as usize..] {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        loop {
            if try_section(&mut scenario, section, number, &tokens)? {
                break;
            }
            section = match section {
                Section::Pois => Section::Blazes,
                Section::Blazes => Section::Doors,
                Section::Doors => Section::Entrances,
                Section::Entrances => {
                    return Err(ScenarioError::UnexpectedLine {
                        line: number,
                        content: line.to_string(),
                    })
                }
            };
        }
    }

    Ok(scenario)
}

fn parse_mask(mask: &str) -> Option<CellLayout> {
    if mask.len() != 4 {
        return None;
    }
    let mut layout = CellLayout::open();
    for (i, ch) in mask.chars().enumerate() {
        layout.walls[i] = match ch {
            '0' => false,
            '1' => true,
            _ => return None,
        };
    }
    Some(layout)
}

/// Apply a line to `section`. `Ok(false)` means the line belongs to a later
/// section.
fn try_section(
    scenario: &mut Scenario,
    section: Section,
    line: usize,
    tokens: &[&str],
) -> Result<bool, ScenarioError> {
    let numeric = |count: usize| tokens.len() == count && tokens.iter().all(|t| t.parse::<i64>().is_ok());

    match section {
        Section::Pois => {
            if tokens.len() != 3 {
                return Ok(false);
            }
            let kind = match tokens[2].to_ascii_lowercase().as_str() {
                "v" => PoiKind::Victim,
                "f" => PoiKind::FalseAlarm,
                _ => return Ok(false),
            };
            let pos = position(line, tokens[0], tokens[1])?;
            scenario.pois.push((pos, kind));
        }
        Section::Blazes | Section::Entrances => {
            if !numeric(2) {
                return Ok(false);
            }
            let pos = position(line, tokens[0], tokens[1])?;
            if section == Section::Blazes {
                scenario.blazes.push(pos);
            } else {
                scenario.entrances.push(pos);
            }
        }
        Section::Doors => {
            if !numeric(4) {
                return Ok(false);
            }
            let a = position(line, tokens[0], tokens[1])?;
            let b = position(line, tokens[2], tokens[3])?;
            scenario.doors.push((a, b));
        }
    }
    Ok(true)
}

fn coordinate(line: usize, token: &str) -> Result<u32, ScenarioError> {
    match token.parse::<u32>() {
        Ok(v) if v >= 1 => Ok(v - 1),
        _ => Err(ScenarioError::BadCoordinate {
            line,
            value: token.to_string(),
        }),
    }
}

fn position(line: usize, row: &str, col: &str) -> Result<Position, ScenarioError> {
    let y = coordinate(line, row)?;
    let x = coordinate(line, col)?;
    Ok(Position::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Direction;

    #[test]
    fn test_sample_parses() {
        let scenario = parse_layout(SAMPLE_LAYOUT, 8, 6).unwrap();

        assert_eq!(scenario.pois[0], (Position::new(3, 1), PoiKind::Victim));
        assert_eq!(scenario.pois[1], (Position::new(1, 4), PoiKind::FalseAlarm));
        assert_eq!(scenario.blazes[0], Position::new(1, 0));
        assert_eq!(scenario.doors[0], (Position::new(2, 0), Position::new(3, 0)));
        assert_eq!(
            scenario.entrances,
            vec![
                Position::new(5, 0),
                Position::new(0, 2),
                Position::new(7, 3),
                Position::new(2, 5),
            ]
        );

        let corner = scenario.layout(Position::new(0, 0));
        assert!(corner.has_wall(Direction::North));
        assert!(corner.has_wall(Direction::West));
        assert!(!corner.has_wall(Direction::South));
        assert_eq!(corner.mask(), "1100");
    }

    #[test]
    fn test_missing_rows() {
        let err = parse_layout("0000 0000", 2, 2).unwrap_err();
        assert_eq!(err, ScenarioError::MissingWallRows { expected: 2, found: 1 });
    }

    #[test]
    fn test_row_width() {
        let err = parse_layout("0000\n0000 0000", 2, 2).unwrap_err();
        assert!(matches!(err, ScenarioError::RowWidth { row: 1, .. }));
    }

    #[test]
    fn test_malformed_mask() {
        let err = parse_layout("0000 0200", 2, 1).unwrap_err();
        assert!(matches!(err, ScenarioError::MalformedMask { column: 2, .. }));
        assert!(err.to_string().contains("0200"));
    }

    #[test]
    fn test_zero_coordinate_rejected() {
        let err = parse_layout("0000\n0 1 v", 1, 1).unwrap_err();
        assert!(matches!(err, ScenarioError::BadCoordinate { line: 2, .. }));
    }

    #[test]
    fn test_trailing_garbage() {
        let err = parse_layout("0000\n1 1\nhello", 1, 1).unwrap_err();
        assert!(matches!(err, ScenarioError::UnexpectedLine { line: 3, .. }));
    }

    #[test]
    fn test_sections_may_be_empty() {
        // No POIs, no blazes: the first two-number line after the door goes
        // to entrances.
        let scenario = parse_layout("0001 0100\n1 1 1 2\n1 1", 2, 1).unwrap();
        assert!(scenario.pois.is_empty());
        assert!(scenario.blazes.is_empty());
        assert_eq!(scenario.doors.len(), 1);
        assert_eq!(scenario.entrances, vec![Position::new(0, 0)]);
    }
}
