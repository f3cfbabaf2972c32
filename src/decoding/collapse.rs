/// Apply the CTC merge and filter rules to one decoded sequence.
///
/// Repeats are merged on raw adjacency first, then blanks are dropped, so a
/// blank between two equal symbols keeps both of them: `a, -, a` gives
/// `a, a`.
pub fn filter_ctc_output<T: PartialEq + Clone>(sequence: &[T], blank_id: &T) -> Vec<T> {
    let mut out = Vec::with_capacity(sequence.len());
    let mut prev: Option<&T> = None;
    for symbol in sequence {
        if prev != Some(symbol) && symbol != blank_id {
            out.push(symbol.clone());
        }
        prev = Some(symbol);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_repeats_and_drops_blanks() {
        let input = ["a", "a", "blank", "b", "b", "blank", "c"];
        assert_eq!(filter_ctc_output(&input, &"blank"), vec!["a", "b", "c"]);
    }

    #[test]
    fn blank_separates_equal_symbols() {
        let input = ["a", "blank", "a"];
        assert_eq!(filter_ctc_output(&input, &"blank"), vec!["a", "a"]);
    }

    #[test]
    fn repeated_blanks_between_equal_symbols() {
        assert_eq!(filter_ctc_output(&[3u32, 0, 0, 3, 3], &0), vec![3, 3]);
    }

    #[test]
    fn empty_input() {
        let input: [i32; 0] = [];
        assert!(filter_ctc_output(&input, &0).is_empty());
    }

    #[test]
    fn single_symbol() {
        assert_eq!(filter_ctc_output(&["x"], &"blank"), vec!["x"]);
    }

    #[test]
    fn all_blank() {
        assert!(filter_ctc_output(&[5u8, 5, 5], &5).is_empty());
    }

    #[test]
    fn owned_strings() {
        let input: Vec<String> = ["h", "h", "_", "i"].iter().map(|s| s.to_string()).collect();
        let out = filter_ctc_output(&input, &"_".to_string());
        assert_eq!(out, vec!["h".to_string(), "i".to_string()]);
    }

    #[test]
    fn blank_id_outside_sequence() {
        assert_eq!(filter_ctc_output(&[1usize, 2, 2, 1], &99), vec![1, 2, 1]);
    }
}
