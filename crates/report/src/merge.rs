use std::fmt;

use serde::Serialize;

use crate::summary::SummaryTable;

/// The three report sections a month's workbook carries. Each one's target
/// sheet is named `{month_code}_{section}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    Primary,
    #[serde(rename = "PSA")]
    Psa,
    #[serde(rename = "MISC")]
    Misc,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Primary, Section::Psa, Section::Misc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Primary => "Primary",
            Section::Psa => "PSA",
            Section::Misc => "MISC",
        }
    }

    pub fn sheet_name(&self, month_code: &str) -> String {
        format!("{month_code}_{self}")
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One merged lookup table per section.
#[derive(Debug, Clone)]
pub struct SectionTables {
    pub primary: SummaryTable,
    pub psa: SummaryTable,
    pub misc: SummaryTable,
}

impl SectionTables {
    pub fn table(&self, section: Section) -> &SummaryTable {
        match section {
            Section::Primary => &self.primary,
            Section::Psa => &self.psa,
            Section::Misc => &self.misc,
        }
    }
}

/// Key-union of two tables; on a key collision the second table's row wins.
/// The same precedence rule applies everywhere a key repeats, so merging is
/// deterministic and repeatable.
fn union(label: &str, first: &SummaryTable, second: &SummaryTable) -> SummaryTable {
    let mut merged = SummaryTable::with_label(label);
    for (key, row) in first.iter() {
        merged.insert(key.to_string(), row.clone());
    }
    for (key, row) in second.iter() {
        merged.insert(key.to_string(), row.clone());
    }
    merged
}

/// Build the per-section tables from the four summary extracts.
///
/// Primary pairs the APP and CLP books; the PSA and MISC books each take APP
/// as their overlay, since APP providers can appear on any section's sheet.
pub fn merge_sections(
    app: &SummaryTable,
    clp: &SummaryTable,
    misc: &SummaryTable,
    psa: &SummaryTable,
) -> SectionTables {
    SectionTables {
        primary: union("Primary", app, clp),
        psa: union("PSA", psa, app),
        misc: union("MISC", misc, app),
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SummaryRow;
    use rollfwd_grid::CellValue;

    fn table(label: &str, rows: &[(&str, f64)]) -> SummaryTable {
        let mut t = SummaryTable::with_label(label);
        for (key, marker) in rows {
            t.insert(
                key.to_string(),
                SummaryRow {
                    provider: key.to_uppercase(),
                    values: std::array::from_fn(|_| CellValue::Number(*marker)),
                },
            );
        }
        t
    }

    fn marker(t: &SummaryTable, key: &str) -> f64 {
        match t.get(key).unwrap().values[0] {
            CellValue::Number(n) => n,
            ref other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn test_section_sheet_names() {
        assert_eq!(Section::Primary.sheet_name("Jun25"), "Jun25_Primary");
        assert_eq!(Section::Psa.sheet_name("Jun25"), "Jun25_PSA");
        assert_eq!(Section::Misc.sheet_name("Jun25"), "Jun25_MISC");
    }

    #[test]
    fn test_merge_unions_keys() {
        let app = table("APP", &[("smith", 1.0), ("jones", 1.0)]);
        let clp = table("CLP", &[("patel", 2.0)]);
        let misc = table("MISC", &[("wong", 3.0)]);
        let psa = table("PSA", &[("garcia", 4.0)]);

        let sections = merge_sections(&app, &clp, &misc, &psa);
        assert_eq!(sections.primary.len(), 3);
        assert!(sections.primary.contains_key("smith"));
        assert!(sections.primary.contains_key("patel"));
        assert_eq!(sections.psa.len(), 3);
        assert!(sections.psa.contains_key("garcia"));
        assert!(sections.psa.contains_key("jones"));
        assert_eq!(sections.misc.len(), 3);
        assert!(sections.misc.contains_key("wong"));
    }

    #[test]
    fn test_merge_second_table_wins_on_collision() {
        let app = table("APP", &[("smith", 1.0)]);
        let clp = table("CLP", &[("smith", 2.0)]);
        let misc = table("MISC", &[("smith", 3.0)]);
        let psa = table("PSA", &[("smith", 4.0)]);

        let sections = merge_sections(&app, &clp, &misc, &psa);
        // Primary = APP then CLP; PSA/MISC take APP as the overlay.
        assert_eq!(marker(&sections.primary, "smith"), 2.0);
        assert_eq!(marker(&sections.psa, "smith"), 1.0);
        assert_eq!(marker(&sections.misc, "smith"), 1.0);
    }

    #[test]
    fn test_merge_is_repeatable() {
        let app = table("APP", &[("a", 1.0), ("b", 1.0)]);
        let clp = table("CLP", &[("b", 2.0), ("c", 2.0)]);
        let misc = table("MISC", &[("d", 3.0)]);
        let psa = table("PSA", &[("a", 4.0)]);

        let first = merge_sections(&app, &clp, &misc, &psa);
        let second = merge_sections(&app, &clp, &misc, &psa);
        let keys = |t: &SummaryTable| -> Vec<String> {
            t.iter().map(|(k, _)| k.to_string()).collect()
        };
        assert_eq!(keys(&first.primary), keys(&second.primary));
        assert_eq!(keys(&first.psa), keys(&second.psa));
        assert_eq!(keys(&first.misc), keys(&second.misc));
        assert_eq!(marker(&first.primary, "b"), marker(&second.primary, "b"));
    }

    #[test]
    fn test_inputs_not_consumed() {
        let app = table("APP", &[("smith", 1.0)]);
        let clp = table("CLP", &[("smith", 2.0)]);
        let misc = table("MISC", &[("x", 3.0)]);
        let psa = table("PSA", &[("y", 4.0)]);
        let _ = merge_sections(&app, &clp, &misc, &psa);
        assert_eq!(marker(&app, "smith"), 1.0);
        assert_eq!(app.len(), 1);
    }
}
