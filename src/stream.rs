use crate::render::Renderer;
use crate::resolver::{Resolver, RunAction, Step};
use crate::types::{ActiveRegion, Region, RegionId, Update};

/// Parser context for one stream.
///
/// Holds the resolver state (pending run, fence/inline flags) and the renderer's region table.
/// Feed it fragments with [`FenceStream::append`] in arrival order and call
/// [`FenceStream::finalize`] once the source is exhausted. Fragment boundaries never affect the
/// result: any partition of the same text yields the same regions.
#[derive(Debug, Default, Clone)]
pub struct FenceStream {
    resolver: Resolver,
    renderer: Renderer,
    finished: bool,
}

impl FenceStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, fragment: &str) -> Update {
        self.finished = false;
        for ch in fragment.chars() {
            self.feed(ch);
        }
        self.renderer.take_update()
    }

    /// Resolves a trailing backtick run, if any, and marks the stream finished.
    ///
    /// Unbalanced fences or inline spans are left open; that is a valid final state. Calling
    /// this again is a no-op apart from the `finished` flag on the returned update.
    pub fn finalize(&mut self) -> Update {
        if let Some(action) = self.resolver.end_of_stream() {
            self.apply(action);
        }
        self.finished = true;

        tracing::debug!(
            regions = self.renderer.regions().len(),
            left_open = ?self.renderer.active(),
            "stream finalized"
        );

        let mut update = self.renderer.take_update();
        update.finished = true;
        update
    }

    pub fn regions(&self) -> &[Region] {
        self.renderer.regions()
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.renderer.region(id)
    }

    pub fn active(&self) -> ActiveRegion {
        self.renderer.active()
    }

    pub fn pending_run(&self) -> usize {
        self.resolver.pending_run()
    }

    pub fn in_fence(&self) -> bool {
        self.resolver.in_fence()
    }

    pub fn in_inline(&self) -> bool {
        self.resolver.in_inline()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_regions(self) -> Vec<Region> {
        self.renderer.regions().to_vec()
    }

    fn feed(&mut self, ch: char) {
        if let Step::Literal { action, ch } = self.resolver.feed(ch) {
            if let Some(action) = action {
                self.apply(action);
            }
            self.renderer.literal(ch);
        }
    }

    fn apply(&mut self, action: RunAction) {
        match action {
            RunAction::OpenFence => self.renderer.open_fence(),
            RunAction::CloseFence => self.renderer.close_fence(),
            RunAction::OpenInline => self.renderer.open_inline(),
            RunAction::CloseInline => self.renderer.close_inline(),
            RunAction::Literal(n) => {
                for _ in 0..n {
                    self.renderer.literal(crate::resolver::BACKTICK);
                }
            }
        }
    }
}
