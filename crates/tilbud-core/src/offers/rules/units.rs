//! Quantity/unit extraction ("2 kg", "1,5 l", "6 stk").

use super::patterns::UNIT_QUANTITY;
use super::MentionScanner;
use crate::offers::text::TextIndex;

/// A quantity with a unit from the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitMention {
    /// Raw quantity token, not parsed.
    pub quantity: String,
    /// Lower-cased unit.
    pub unit: String,
    /// Character offset of the quantity.
    pub offset: usize,
}

/// Unit mention scanner.
pub struct UnitScanner;

impl UnitScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnitScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MentionScanner for UnitScanner {
    type Mention = UnitMention;

    fn scan_indexed(&self, index: &TextIndex<'_>) -> Vec<Self::Mention> {
        UNIT_QUANTITY
            .captures_iter(index.text())
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                Some(UnitMention {
                    quantity: caps[1].to_string(),
                    unit: caps[2].to_lowercase(),
                    offset: index.char_offset(full_match.start()),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_kg() {
        let units = UnitScanner::new().scan("Kartofler 2 kg");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].unit, "kg");
        assert_eq!(units[0].quantity, "2");
        assert_eq!(units[0].offset, 10);
    }

    #[test]
    fn test_extract_stk() {
        let units = UnitScanner::new().scan("Æbler 6 stk");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].unit, "stk");
        assert_eq!(units[0].offset, 6);
    }

    #[test]
    fn test_decimal_quantity_is_kept_raw() {
        let units = UnitScanner::new().scan("Cola 1,5 L");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].quantity, "1,5");
        assert_eq!(units[0].unit, "l");
    }

    #[test]
    fn test_whole_vocabulary() {
        let text = "1 kg 2 g 3 l 4 ml 5 cl 6 dl 7 stk 8 pk 9 bk 10 ps 11 pose";
        let units: Vec<String> = UnitScanner::new().scan(text).into_iter().map(|u| u.unit).collect();
        assert_eq!(
            units,
            vec!["kg", "g", "l", "ml", "cl", "dl", "stk", "pk", "bk", "ps", "pose"]
        );
    }

    #[test]
    fn test_units_inside_words_are_ignored() {
        assert!(UnitScanner::new().scan("2 liter mælk, 3 gulerødder").is_empty());
    }
}
