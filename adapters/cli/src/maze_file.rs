//! Plain-text maze files: a stats line followed by one line per maze row.

use sokoban_core::PlayerStats;
use sokoban_system_maze_builder::parse_rows;
use thiserror::Error;

/// Separators accepted between the two numbers of the stats line.
const STATS_DELIMITERS: [char; 3] = [',', ' ', '\t'];

/// Contents of a maze file before the maze is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MazeFile {
    /// Statistics the player starts with.
    pub(crate) stats: PlayerStats,
    /// Raw cell codes, one vector per maze row.
    pub(crate) rows: Vec<Vec<char>>,
}

impl MazeFile {
    /// Splits a maze file into its stats line and maze rows.
    ///
    /// Blank lines before the stats line and after the last row are ignored.
    pub(crate) fn parse(text: &str) -> Result<Self, MazeFileError> {
        let mut lines = parse_rows(text)
            .into_iter()
            .skip_while(|line| line.iter().all(|symbol| symbol.is_whitespace()));

        let stats_line: String = lines
            .next()
            .ok_or(MazeFileError::MissingStats)?
            .into_iter()
            .collect();
        let stats = parse_stats(&stats_line)?;

        let mut rows: Vec<Vec<char>> = lines.collect();
        while rows.last().is_some_and(Vec::is_empty) {
            let _ = rows.pop();
        }
        if rows.is_empty() {
            return Err(MazeFileError::NoMazeRows);
        }

        Ok(Self { stats, rows })
    }
}

/// Errors that can occur while reading a maze file.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum MazeFileError {
    /// The file was empty or contained only whitespace.
    #[error("maze file is missing the stats line")]
    MissingStats,
    /// The stats line did not hold exactly two integers.
    #[error("could not parse stats line '{0}', expected '<strength> <moves>'")]
    MalformedStats(String),
    /// The stats line was not followed by any maze rows.
    #[error("maze file has no maze rows")]
    NoMazeRows,
}

fn parse_stats(line: &str) -> Result<PlayerStats, MazeFileError> {
    let malformed = || MazeFileError::MalformedStats(line.trim().to_owned());
    let values = line
        .split(STATS_DELIMITERS)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<i32>().map_err(|_| malformed()))
        .collect::<Result<Vec<i32>, _>>()?;

    match values.as_slice() {
        [strength, moves] => Ok(PlayerStats::new(*strength, *moves)),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_stats_and_rows() {
        let file = MazeFile::parse("2 15\nWWWW\nWP1G\nWWWW\n").expect("maze file parses");

        assert_eq!(file.stats, PlayerStats::new(2, 15));
        assert_eq!(file.rows.len(), 3);
        assert_eq!(file.rows[1], vec!['W', 'P', '1', 'G']);
    }

    #[test]
    fn parse_accepts_comma_separated_stats_and_blank_padding() {
        let file = MazeFile::parse("\n\n1,4\r\nP G\r\n\n\n").expect("maze file parses");

        assert_eq!(file.stats, PlayerStats::new(1, 4));
        assert_eq!(file.rows, vec![vec!['P', ' ', 'G']]);
    }

    #[test]
    fn parse_keeps_rows_made_of_floor() {
        let file = MazeFile::parse("0 1\nP \n  \n").expect("maze file parses");
        assert_eq!(file.rows[1], vec![' ', ' ']);
    }

    #[test]
    fn parse_rejects_missing_pieces() {
        assert_eq!(MazeFile::parse("  \n"), Err(MazeFileError::MissingStats));
        assert_eq!(MazeFile::parse("1 2\n"), Err(MazeFileError::NoMazeRows));
        assert_eq!(
            MazeFile::parse("1 two\nP\n"),
            Err(MazeFileError::MalformedStats("1 two".to_owned()))
        );
        assert_eq!(
            MazeFile::parse("1 2 3\nP\n"),
            Err(MazeFileError::MalformedStats("1 2 3".to_owned()))
        );
    }
}
