//! Prompt strings printed by `legendary sync-saves`.
//!
//! These are the only coupling to the tool's output; update them here when the
//! tool changes its wording.

/// Printed after the tool computed a save path and asks the user to accept it.
pub const CONFIRM_MARKER: &str = "Is this correct?";

/// Printed when the tool could not expand every variable in the save path.
pub const UNRESOLVABLE_MARKER: &str =
    "Path contains unprocessed variables, please enter the correct path manually";

/// A recognized prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// The tool asks for confirmation of a computed path.
    Confirm,
    /// The tool gave up and wants the path typed in manually.
    Unresolvable,
}

impl Marker {
    fn all() -> &'static [Marker] {
        &[Marker::Confirm, Marker::Unresolvable]
    }

    fn text(self) -> &'static [u8] {
        match self {
            Marker::Confirm => CONFIRM_MARKER.as_bytes(),
            Marker::Unresolvable => UNRESOLVABLE_MARKER.as_bytes(),
        }
    }
}

/// Finds markers in a stream that arrives in arbitrary chunks.
///
/// Keeps the tail of previously seen bytes so a marker split across two reads
/// is still found, and reports every marker occurrence exactly once.
#[derive(Debug, Default)]
pub struct MarkerScanner {
    tail: Vec<u8>,
}

impl MarkerScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next chunk and returns the markers completed by it, in
    /// stream order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Marker> {
        let carried = self.tail.len();
        let mut window = std::mem::take(&mut self.tail);
        window.extend_from_slice(chunk);

        let mut found: Vec<(usize, Marker)> = Vec::new();
        for &marker in Marker::all() {
            let needle = marker.text();
            for start in find_all(&window, needle) {
                // Matches entirely inside the carried tail were reported by
                // the previous call.
                if start + needle.len() > carried {
                    found.push((start, marker));
                }
            }
        }
        found.sort_by_key(|(start, _)| *start);

        let keep = max_marker_len().saturating_sub(1).min(window.len());
        self.tail = window[window.len() - keep..].to_vec();

        found.into_iter().map(|(_, marker)| marker).collect()
    }
}

fn max_marker_len() -> usize {
    Marker::all()
        .iter()
        .map(|m| m.text().len())
        .max()
        .unwrap_or(0)
}

fn find_all<'a>(haystack: &'a [u8], needle: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(move |(_, window)| *window == needle)
        .map(|(start, _)| start)
}
