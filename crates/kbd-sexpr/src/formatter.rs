//! Rendering of S-expression trees.
//!
//! [`to_compact`] writes a tree on a single line. [`format_tree`] produces the
//! layout KiCad itself writes for footprint files: tab indentation, each child
//! list on its own line, and short lists kept on one line.

use crate::Sexpr;

/// Lists whose single-line form (plus indentation) fits in this many columns
/// stay on one line.
pub const LINE_WIDTH: usize = 99;

/// Decimal places written for floating-point atoms.
pub const FLOAT_PRECISION: usize = 6;

/// Format a tree through the KiCad-style pretty printer.
///
/// The root list is always broken across lines when it has child lists. The
/// returned string ends with a newline.
pub fn format_tree(sexpr: &Sexpr) -> String {
    let mut out = String::new();
    write_pretty(sexpr, 0, &mut out);
    out.push('\n');
    out
}

/// Render a tree on a single line.
pub fn to_compact(sexpr: &Sexpr) -> String {
    let mut out = String::new();
    write_compact(sexpr, &mut out);
    out
}

fn write_pretty(sexpr: &Sexpr, depth: usize, out: &mut String) {
    let Sexpr::List(items) = sexpr else {
        write_compact(sexpr, out);
        return;
    };

    let compact = to_compact(sexpr);
    let has_child_lists = items.iter().any(Sexpr::is_list);
    let force_break = depth == 0 && has_child_lists;
    if !force_break && (depth + compact.len() <= LINE_WIDTH || !has_child_lists) {
        out.push_str(&compact);
        return;
    }

    // Leading atoms (the tag and any positional values) stay on the opening line.
    let split = items.iter().position(Sexpr::is_list).unwrap_or(items.len());
    out.push('(');
    for (idx, item) in items[..split].iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        write_compact(item, out);
    }

    for child in &items[split..] {
        out.push('\n');
        push_indent(out, depth + 1);
        write_pretty(child, depth + 1, out);
    }

    out.push('\n');
    push_indent(out, depth);
    out.push(')');
}

fn write_compact(sexpr: &Sexpr, out: &mut String) {
    match sexpr {
        Sexpr::Symbol(s) => out.push_str(s),
        Sexpr::String(s) => out.push_str(&quote_string(s)),
        Sexpr::Int(n) => out.push_str(&n.to_string()),
        Sexpr::Float(f) => out.push_str(&format_float(*f)),
        Sexpr::List(items) => {
            out.push('(');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(' ');
                }
                write_compact(item, out);
            }
            out.push(')');
        }
    }
}

/// Write a float with at most [`FLOAT_PRECISION`] decimals and no trailing
/// zeros. Negative zero is written as `0`.
pub fn format_float(value: f64) -> String {
    let mut s = format!("{:.*}", FLOAT_PRECISION, value);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

/// Quote a string value, escaping special characters.
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

fn push_indent(out: &mut String, depth: usize) {
    out.extend(std::iter::repeat_n('\t', depth));
}

#[cfg(test)]
mod tests {
    use super::{format_float, format_tree, to_compact};
    use crate::{Sexpr, kv, parse, xy};

    #[test]
    fn float_formatting() {
        assert_eq!(format_float(1.0), "1");
        assert_eq!(format_float(-5.08), "-5.08");
        assert_eq!(format_float(4.760000000000001), "4.76");
        assert_eq!(format_float(-0.0), "0");
        assert_eq!(format_float(-0.0000001), "0");
        assert_eq!(format_float(0.15), "0.15");
        assert_eq!(format_float(9.525), "9.525");
    }

    #[test]
    fn compact_quotes_strings() {
        let node = Sexpr::list(vec![
            Sexpr::symbol("descr"),
            Sexpr::string("Cherry MX keyswitch, \"1.00u\""),
        ]);
        assert_eq!(
            to_compact(&node),
            r#"(descr "Cherry MX keyswitch, \"1.00u\"")"#
        );
    }

    #[test]
    fn root_always_breaks() {
        let node = Sexpr::list(vec![
            Sexpr::symbol("footprint"),
            Sexpr::string("X"),
            kv("layer", Sexpr::string("F.Cu")),
        ]);
        assert_eq!(format_tree(&node), "(footprint \"X\"\n\t(layer \"F.Cu\")\n)\n");
    }

    #[test]
    fn short_children_stay_on_one_line() {
        let node = Sexpr::list(vec![
            Sexpr::symbol("footprint"),
            Sexpr::string("X"),
            Sexpr::list(vec![
                Sexpr::symbol("fp_line"),
                xy("start", 0.0, 0.0),
                xy("end", 1.0, 0.0),
            ]),
        ]);
        assert_eq!(
            format_tree(&node),
            "(footprint \"X\"\n\t(fp_line (start 0 0) (end 1 0))\n)\n"
        );
    }

    #[test]
    fn long_children_break_and_nest() {
        let pts: Vec<Sexpr> = (0..12).map(|i| xy("xy", i as f64 * 1.25, -9.525)).collect();
        let mut poly = vec![Sexpr::symbol("pts")];
        poly.extend(pts);
        let node = Sexpr::list(vec![
            Sexpr::symbol("footprint"),
            Sexpr::string("X"),
            Sexpr::list(vec![Sexpr::symbol("fp_poly"), Sexpr::list(poly)]),
        ]);

        let out = format_tree(&node);
        assert!(out.starts_with("(footprint \"X\"\n\t(fp_poly\n\t\t(pts\n\t\t\t(xy 0 -9.525)\n"));
        assert!(out.ends_with("\t\t)\n\t)\n)\n"));
    }

    #[test]
    fn formatted_output_parses_back() {
        let node = Sexpr::list(vec![
            Sexpr::symbol("footprint"),
            Sexpr::string("Cherry_MX_1.00u"),
            kv("version", 20221018_i64),
            Sexpr::list(vec![
                Sexpr::symbol("pad"),
                Sexpr::string("1"),
                Sexpr::symbol("thru_hole"),
                Sexpr::symbol("circle"),
                xy("at", 2.54, -5.08),
            ]),
        ]);
        assert_eq!(parse(&format_tree(&node)).unwrap(), node);
    }
}
