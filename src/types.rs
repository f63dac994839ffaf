use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(pub u64);

impl fmt::Debug for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionId({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    PlainRun,
    InlineCode,
    FenceBlock,
}

impl RegionKind {
    pub fn label(self) -> &'static str {
        match self {
            RegionKind::PlainRun => "plain",
            RegionKind::InlineCode => "inline",
            RegionKind::FenceBlock => "fence",
        }
    }

    pub fn is_code(self) -> bool {
        !matches!(self, RegionKind::PlainRun)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStatus {
    /// Still accepts appends (the active code region, or the trailing plain run).
    Open,
    /// Superseded or toggled off; its text is final.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: RegionId,
    pub kind: RegionKind,
    pub status: RegionStatus,
    pub text: String,
}

impl Region {
    pub fn new(id: RegionId, kind: RegionKind) -> Self {
        Self {
            id,
            kind,
            status: RegionStatus::Open,
            text: String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == RegionStatus::Open
    }
}

/// Where literal characters currently go.
///
/// `None` routes to plain text; the other variants point into the renderer's region table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveRegion {
    #[default]
    None,
    Fence(RegionId),
    Inline(RegionId),
}

impl ActiveRegion {
    pub fn id(self) -> Option<RegionId> {
        match self {
            ActiveRegion::None => None,
            ActiveRegion::Fence(id) | ActiveRegion::Inline(id) => Some(id),
        }
    }
}

/// Text appended to one region during a single `append`/`finalize` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDelta {
    pub id: RegionId,
    pub kind: RegionKind,
    /// The region was created during this call.
    pub opened: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Update {
    /// Per-region deltas, in order of first touch.
    pub deltas: Vec<RegionDelta>,
    /// Regions that stopped accepting appends during this call.
    pub closed: Vec<RegionId>,
    /// Set once the stream has been finalized.
    pub finished: bool,
}

impl Update {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty() && self.closed.is_empty() && !self.finished
    }

    pub fn opened(&self) -> impl Iterator<Item = &RegionDelta> {
        self.deltas.iter().filter(|d| d.opened)
    }

    pub fn apply_to(self, regions: &mut Vec<Region>) {
        for delta in self.deltas {
            if delta.opened {
                let mut region = Region::new(delta.id, delta.kind);
                region.text = delta.text;
                regions.push(region);
                continue;
            }
            // Deltas only ever touch recent regions, so search from the back.
            if let Some(region) = regions.iter_mut().rev().find(|r| r.id == delta.id) {
                region.text.push_str(&delta.text);
            }
        }
        for id in self.closed {
            if let Some(region) = regions.iter_mut().rev().find(|r| r.id == id) {
                region.status = RegionStatus::Closed;
            }
        }
    }
}
