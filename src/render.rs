use crate::types::{ActiveRegion, Region, RegionDelta, RegionId, RegionKind, RegionStatus, Update};

/// Owns the region table and routes literal characters into it.
///
/// Regions are append-only and never removed. Plain text merges into the trailing plain run;
/// any other region appearing after it closes the run for good.
#[derive(Debug, Default, Clone)]
pub struct Renderer {
    regions: Vec<Region>,
    active: ActiveRegion,
    next_id: u64,
    // Bookkeeping for the update of the call in progress.
    deltas: Vec<RegionDelta>,
    closed: Vec<RegionId>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn active(&self) -> ActiveRegion {
        self.active
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(index_of(id)?).filter(|r| r.id == id)
    }

    pub fn literal(&mut self, ch: char) {
        let mergeable = matches!(
            self.regions.last(),
            Some(last) if last.kind == RegionKind::PlainRun && last.is_open()
        );
        let idx = match self.active.id().and_then(index_of) {
            Some(idx) => idx,
            None if mergeable => self.regions.len() - 1,
            None => self.push_region(RegionKind::PlainRun),
        };
        let region = &mut self.regions[idx];
        region.text.push(ch);
        let (id, kind) = (region.id, region.kind);
        self.delta_mut(id, kind, false).text.push(ch);
    }

    pub fn open_fence(&mut self) {
        let idx = self.open(RegionKind::FenceBlock);
        self.active = ActiveRegion::Fence(self.regions[idx].id);
        tracing::trace!(id = ?self.regions[idx].id, "fence opened");
    }

    pub fn close_fence(&mut self) {
        if let ActiveRegion::Fence(id) = self.active {
            tracing::trace!(?id, "fence closed");
            self.close_active();
        }
    }

    pub fn open_inline(&mut self) {
        let idx = self.open(RegionKind::InlineCode);
        self.active = ActiveRegion::Inline(self.regions[idx].id);
        tracing::trace!(id = ?self.regions[idx].id, "inline code opened");
    }

    pub fn close_inline(&mut self) {
        if let ActiveRegion::Inline(id) = self.active {
            tracing::trace!(?id, "inline code closed");
            self.close_active();
        }
    }

    /// Drains the bookkeeping collected since the previous call.
    pub fn take_update(&mut self) -> Update {
        Update {
            deltas: std::mem::take(&mut self.deltas),
            closed: std::mem::take(&mut self.closed),
            finished: false,
        }
    }

    fn open(&mut self, kind: RegionKind) -> usize {
        // Whatever was receiving text before (an active code region or the trailing plain
        // run) stops here.
        self.close_active();
        if let Some(last) = self.regions.last_mut() {
            if last.is_open() {
                last.status = RegionStatus::Closed;
                self.closed.push(last.id);
            }
        }
        self.push_region(kind)
    }

    fn close_active(&mut self) {
        let Some(id) = self.active.id() else {
            return;
        };
        self.active = ActiveRegion::None;
        if let Some(region) = index_of(id).and_then(|idx| self.regions.get_mut(idx)) {
            if region.is_open() {
                region.status = RegionStatus::Closed;
                self.closed.push(id);
            }
        }
    }

    fn push_region(&mut self, kind: RegionKind) -> usize {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        self.regions.push(Region::new(id, kind));
        self.deltas.push(RegionDelta {
            id,
            kind,
            opened: true,
            text: String::new(),
        });
        self.regions.len() - 1
    }

    fn delta_mut(&mut self, id: RegionId, kind: RegionKind, opened: bool) -> &mut RegionDelta {
        // Appends always hit the most recently touched region, so the last delta is the hot path.
        let pos = match self.deltas.iter().rposition(|d| d.id == id) {
            Some(pos) => pos,
            None => {
                self.deltas.push(RegionDelta {
                    id,
                    kind,
                    opened,
                    text: String::new(),
                });
                self.deltas.len() - 1
            }
        };
        &mut self.deltas[pos]
    }
}

/// Ids are allocated in table order starting at 0, so an id is also its table index.
fn index_of(id: RegionId) -> Option<usize> {
    usize::try_from(id.0).ok()
}
