//! Instance file parsers feeding [`GraphBuilder`] — an out-of-scope-for-the-
//! core collaborator that hands it a finished [`Graph`], nothing more.
//!
//! Grounded on `original_source/src/stable/instance_builder.cpp`'s five
//! `read_*` functions: each is a thin line-oriented loop calling the same
//! builder operations the core already validates input through.

use stablesolver::graph::{DuplicatePolicy, Graph, GraphBuilder};
use stablesolver::{Error, Result};

/// One of the five instance formats the builder accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Dimacs1992,
    Dimacs2010,
    MatrixMarket,
    Chaco,
    Snap,
}

impl Format {
    /// Parses a CLI `--format` keyword.
    pub fn parse(keyword: &str) -> Result<Self> {
        Ok(match keyword {
            "dimacs1992" => Self::Dimacs1992,
            "dimacs2010" => Self::Dimacs2010,
            "matrixmarket" => Self::MatrixMarket,
            "chaco" => Self::Chaco,
            "snap" => Self::Snap,
            other => return Err(Error::UnknownFormat(other.to_string())),
        })
    }
}

/// Parses `text` in `format` into a [`Graph`].
pub fn read(text: &str, format: Format) -> Result<Graph> {
    let mut builder = GraphBuilder::new();
    match format {
        Format::Dimacs1992 => read_dimacs1992(text, &mut builder)?,
        Format::Dimacs2010 => read_dimacs2010(text, &mut builder)?,
        Format::MatrixMarket => read_matrixmarket(text, &mut builder)?,
        Format::Chaco => read_chaco(text, &mut builder)?,
        Format::Snap => read_snap(text, &mut builder)?,
    }
    builder.build()
}

fn parse_field<T: std::str::FromStr>(field: Option<&str>, format: &str) -> Result<T> {
    field
        .ok_or_else(|| Error::ParseError {
            format: format.to_string(),
            message: "missing field".to_string(),
        })?
        .parse()
        .map_err(|_| Error::ParseError {
            format: format.to_string(),
            message: "unparseable field".to_string(),
        })
}

/// `c` comment / `p edge n m` header / `n v w` weight / `e u v` edge, 1-indexed.
fn read_dimacs1992(text: &str, builder: &mut GraphBuilder) -> Result<()> {
    for line in text.lines() {
        let mut fields = line.split_whitespace();
        match fields.next() {
            None | Some("c") => {}
            Some("p") => {
                let _format_name: &str = fields.next().unwrap_or("edge");
                let n: usize = parse_field(fields.next(), "dimacs1992")?;
                builder.add_vertices(n);
            }
            Some("n") => {
                let v: usize = parse_field::<usize>(fields.next(), "dimacs1992")? - 1;
                let w = parse_field(fields.next(), "dimacs1992")?;
                builder.set_weight(v, w)?;
            }
            Some("e") => {
                let u: usize = parse_field::<usize>(fields.next(), "dimacs1992")? - 1;
                let v: usize = parse_field::<usize>(fields.next(), "dimacs1992")? - 1;
                builder.add_edge(u, v, DuplicatePolicy::Ignore)?;
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// First non-comment line is `n m [fmt]`; each of the next `n` lines lists
/// the 1-indexed neighbors of that vertex, keeping only `v2 > v1` to avoid
/// double-adding the symmetric pair.
fn read_dimacs2010(text: &str, builder: &mut GraphBuilder) -> Result<()> {
    let mut lines = text.lines().filter(|l| !l.starts_with('%'));
    let header = lines.next().ok_or_else(|| Error::ParseError {
        format: "dimacs2010".to_string(),
        message: "empty input".to_string(),
    })?;
    let n: usize = parse_field(header.split_whitespace().next(), "dimacs2010")?;
    builder.add_vertices(n);
    for (v, line) in lines.take(n).enumerate() {
        for field in line.split_whitespace() {
            let u: usize = field.parse::<usize>().map_err(|_| Error::ParseError {
                format: "dimacs2010".to_string(),
                message: "unparseable neighbor id".to_string(),
            })? - 1;
            if u > v {
                builder.add_edge(v, u, DuplicatePolicy::Ignore)?;
            }
        }
    }
    Ok(())
}

/// First non-comment line is `n m [...]`; each following line is `v1 v2`,
/// 1-indexed.
fn read_matrixmarket(text: &str, builder: &mut GraphBuilder) -> Result<()> {
    let mut lines = text.lines().filter(|l| !l.starts_with('%'));
    let header = lines.next().ok_or_else(|| Error::ParseError {
        format: "matrixmarket".to_string(),
        message: "empty input".to_string(),
    })?;
    let n: usize = parse_field(header.split_whitespace().next(), "matrixmarket")?;
    builder.add_vertices(n);
    for line in lines {
        let mut fields = line.split_whitespace();
        let u: usize = parse_field::<usize>(fields.next(), "matrixmarket")? - 1;
        let v: usize = parse_field::<usize>(fields.next(), "matrixmarket")? - 1;
        builder.add_edge(u, v, DuplicatePolicy::Ignore)?;
    }
    Ok(())
}

/// First line is `n m [...]`; each of the next `n` lines lists the
/// 1-indexed neighbors of that vertex (same adjacency-list shape as
/// DIMACS-2010, no leading `%` comments).
fn read_chaco(text: &str, builder: &mut GraphBuilder) -> Result<()> {
    let mut lines = text.lines();
    let header = lines.next().ok_or_else(|| Error::ParseError {
        format: "chaco".to_string(),
        message: "empty input".to_string(),
    })?;
    let n: usize = parse_field(header.split_whitespace().next(), "chaco")?;
    builder.add_vertices(n);
    for (v, line) in lines.take(n).enumerate() {
        for field in line.split_whitespace() {
            let u: usize = field.parse::<usize>().map_err(|_| Error::ParseError {
                format: "chaco".to_string(),
                message: "unparseable neighbor id".to_string(),
            })? - 1;
            if u > v {
                builder.add_edge(v, u, DuplicatePolicy::Ignore)?;
            }
        }
    }
    Ok(())
}

/// `#`-commented header, then `v1 v2` edge pairs, 0-indexed; vertices are
/// created lazily as larger ids are seen.
fn read_snap(text: &str, builder: &mut GraphBuilder) -> Result<()> {
    for line in text.lines().filter(|l| !l.starts_with('#')) {
        let mut fields = line.split_whitespace();
        let u: usize = match fields.next() {
            Some(f) => parse_field(Some(f), "snap")?,
            None => continue,
        };
        let v: usize = parse_field(fields.next(), "snap")?;
        let needed = u.max(v) + 1;
        if needed > builder.num_vertices() {
            builder.add_vertices(needed - builder.num_vertices());
        }
        builder.add_edge(u, v, DuplicatePolicy::Ignore)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimacs1992_four_cycle() {
        let text = "c a comment\np edge 4 4\ne 1 2\ne 2 3\ne 3 4\ne 4 1\n";
        let g = read(text, Format::Dimacs1992).unwrap();
        assert_eq!(g.num_vertices(), 4);
        assert_eq!(g.num_edges(), 4);
    }

    #[test]
    fn dimacs1992_weight_line_is_1_indexed() {
        let text = "p edge 2 0\nn 1 5\nn 2 9\n";
        let g = read(text, Format::Dimacs1992).unwrap();
        assert_eq!(g.weight(0), 5);
        assert_eq!(g.weight(1), 9);
    }

    #[test]
    fn dimacs2010_path() {
        let text = "3 2\n2\n1 3\n2\n";
        let g = read(text, Format::Dimacs2010).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn matrixmarket_triangle() {
        let text = "%%MatrixMarket matrix coordinate pattern symmetric\n3 3\n1 2\n2 3\n1 3\n";
        let g = read(text, Format::MatrixMarket).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 3);
    }

    #[test]
    fn chaco_path() {
        let text = "3 2\n2\n1 3\n2\n";
        let g = read(text, Format::Chaco).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn snap_grows_vertex_count_lazily() {
        let text = "# header\n0 1\n1 2\n0 2\n";
        let g = read(text, Format::Snap).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 3);
    }

    #[test]
    fn unknown_format_keyword_is_an_input_error() {
        assert!(matches!(Format::parse("bogus"), Err(Error::UnknownFormat(_))));
    }
}
