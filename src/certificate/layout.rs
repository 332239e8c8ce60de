//! Greedy word-wrap and vertical centering of text blocks.
//!
//! Everything here is a pure function of the text, the width budget and the
//! metrics behind [`TextMeasure`], so a block can be laid out again on every
//! render once fonts have been resolved.

/// Anything that can report the advance width of a string in pixels.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f32,
{
    fn measure(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Breaks `text` into lines no wider than `max_width`.
///
/// Breaks only at whitespace. A word wider than `max_width` on its own is
/// placed alone on a line and never split. Empty input yields one empty line.
pub fn wrap_text<M>(text: &str, max_width: f32, metrics: &M) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if metrics.measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// A run of lines with baselines spaced by a fixed line height.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBlock {
    pub lines: Vec<String>,
    pub line_height: f32,
    pub first_baseline: f32,
}

impl LineBlock {
    /// Positions `lines` so the middle of the block sits on `anchor_y`.
    pub fn centered(lines: Vec<String>, anchor_y: f32, line_height: f32) -> Self {
        let span = lines.len().saturating_sub(1) as f32 * line_height;
        Self {
            first_baseline: anchor_y - span / 2.0,
            lines,
            line_height,
        }
    }

    pub fn baselines(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.lines.iter().enumerate().map(move |(i, line)| {
            let y = self.first_baseline + i as f32 * self.line_height;
            (line.as_str(), y)
        })
    }
}

/// Vertical band, in baselines, that a wrapped block must stay inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub top: f32,
    pub bottom: f32,
}

impl Slot {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    pub fn anchor(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// How many baselines `line_height` apart fit between `top` and `bottom`.
    pub fn capacity(&self, line_height: f32) -> usize {
        let span = (self.bottom - self.top).max(0.0);
        if line_height <= 0.0 {
            return 1;
        }
        (span / line_height + 1e-3).floor() as usize + 1
    }
}

const ELLIPSIS: &str = "...";

/// Keeps at most `max_lines` lines. When lines are dropped, the last kept
/// line loses trailing words until it fits `max_width` with an ellipsis.
pub fn truncate_lines<M>(
    mut lines: Vec<String>,
    max_lines: usize,
    max_width: f32,
    metrics: &M,
) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let max_lines = max_lines.max(1);
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);

    let last = lines.pop().unwrap_or_default();
    let mut words: Vec<&str> = last.split_whitespace().collect();
    let marked = loop {
        let candidate = format!("{}{}", words.join(" "), ELLIPSIS);
        if words.is_empty() || metrics.measure(&candidate) <= max_width {
            break candidate;
        }
        words.pop();
    };
    lines.push(marked);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every char is 10px wide.
    fn mono(text: &str) -> f32 {
        text.chars().count() as f32 * 10.0
    }

    #[test]
    fn empty_text_gives_a_single_empty_line() {
        assert_eq!(wrap_text("", 100.0, &mono), vec![String::new()]);
        assert_eq!(wrap_text("   \n ", 100.0, &mono), vec![String::new()]);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_text("hello world", 200.0, &mono), vec!["hello world"]);
    }

    #[test]
    fn breaks_greedily_on_word_boundaries() {
        let lines = wrap_text("aaa bbb ccc ddd", 70.0, &mono);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        let lines = wrap_text("aaa   bbb\n\tccc", 1000.0, &mono);
        assert_eq!(lines, vec!["aaa bbb ccc"]);
    }

    #[test]
    fn overlong_word_sits_alone_unsplit() {
        let lines = wrap_text("a supercalifragilistic b", 60.0, &mono);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn every_line_fits_unless_it_is_one_overlong_word() {
        let text = "The quick brown fox jumps over the lazy dog while an \
                    extraordinarily-long-hyphenated-token tries to escape \
                    the layout and some short words follow it in a row";
        for width in [40.0, 75.0, 120.0, 333.0, 800.0] {
            for line in wrap_text(text, width, &mono) {
                let fits = mono(&line) <= width;
                let single_word = !line.contains(' ');
                assert!(fits || single_word, "{:?} overflows {}", line, width);
            }
        }
    }

    #[test]
    fn wrapping_is_lossless_for_words() {
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap_text(text, 90.0, &mono);
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn block_is_centered_on_anchor() {
        let block = LineBlock::centered(vec!["a".into(), "b".into(), "c".into()], 300.0, 20.0);
        let ys: Vec<f32> = block.baselines().map(|(_, y)| y).collect();
        assert_eq!(ys, vec![280.0, 300.0, 320.0]);

        let single = LineBlock::centered(vec!["only".into()], 150.0, 24.0);
        assert_eq!(single.first_baseline, 150.0);
        assert_eq!(single.lines.len(), 1);
    }

    #[test]
    fn even_line_count_straddles_anchor() {
        let block = LineBlock::centered(vec!["a".into(), "b".into()], 100.0, 30.0);
        let ys: Vec<f32> = block.baselines().map(|(_, y)| y).collect();
        assert_eq!(ys, vec![85.0, 115.0]);
    }

    #[test]
    fn slot_capacity_counts_baselines() {
        let slot = Slot::new(100.0, 160.0);
        assert_eq!(slot.anchor(), 130.0);
        assert_eq!(slot.capacity(20.0), 4);
        assert_eq!(slot.capacity(25.0), 3);
        assert_eq!(Slot::new(50.0, 50.0).capacity(18.0), 1);
    }

    #[test]
    fn block_within_capacity_stays_inside_slot() {
        let slot = Slot::new(200.0, 290.0);
        let lines: Vec<String> = (0..slot.capacity(18.0)).map(|i| i.to_string()).collect();
        let block = LineBlock::centered(lines, slot.anchor(), 18.0);
        for (_, y) in block.baselines() {
            assert!(y >= slot.top && y <= slot.bottom, "{} outside slot", y);
        }
    }

    #[test]
    fn truncation_marks_the_cut_and_still_fits() {
        let lines = wrap_text("aaa bbb ccc ddd eee fff ggg hhh", 70.0, &mono);
        assert_eq!(lines.len(), 4);

        let kept = truncate_lines(lines.clone(), 2, 70.0, &mono);
        assert_eq!(kept, vec!["aaa bbb", "ccc..."]);
        assert!(kept.iter().all(|l| mono(l) <= 70.0));

        assert_eq!(truncate_lines(lines.clone(), 10, 70.0, &mono), lines);
    }
}
