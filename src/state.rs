use crate::types::{Region, RegionId, Update};

/// A UI-friendly mirror of the region table.
///
/// Consumers that receive [`Update`]s (possibly on another task) apply them here in order and
/// end up with the same regions the parser holds. It does not own the parser.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Document {
    regions: Vec<Region>,
    finished: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The region currently receiving text, if any.
    pub fn tail(&self) -> Option<&Region> {
        self.regions.last().filter(|r| r.is_open())
    }

    pub fn find(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn clear(&mut self) {
        self.regions.clear();
        self.finished = false;
    }

    pub fn apply(&mut self, update: Update) {
        self.finished = update.finished;
        update.apply_to(&mut self.regions);
    }

    /// Concatenated text of all regions, without any backtick markers.
    pub fn text(&self) -> String {
        self.regions.iter().map(|r| r.text.as_str()).collect()
    }
}
