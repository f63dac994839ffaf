use crate::stream::FenceStream;
use crate::types::Update;

/// Result of one driver step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// One fragment was fully drained through the parser.
    Fed(Update),
    /// The source ran dry; the stream has been finalized.
    Finished(Update),
    /// Nothing left to do.
    Idle,
}

/// Pull-based stream driver: one fragment per [`Driver::tick`].
///
/// The driver only sequences. It never splits, merges or reorders fragments, so whoever calls
/// `tick` (a timer, a render loop, a test) controls the cadence.
#[derive(Debug)]
pub struct Driver<I> {
    stream: FenceStream,
    fragments: I,
    done: bool,
    ticks: u64,
}

impl<I, S> Driver<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    pub fn new(fragments: impl IntoIterator<IntoIter = I>) -> Self {
        Self::with_stream(FenceStream::new(), fragments)
    }

    pub fn with_stream(stream: FenceStream, fragments: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            stream,
            fragments: fragments.into_iter(),
            done: false,
            ticks: 0,
        }
    }

    pub fn stream(&self) -> &FenceStream {
        &self.stream
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Number of fragments fed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick(&mut self) -> Tick {
        if self.done {
            return Tick::Idle;
        }
        match self.fragments.next() {
            Some(fragment) => {
                self.ticks += 1;
                Tick::Fed(self.stream.append(fragment.as_ref()))
            }
            None => {
                self.done = true;
                Tick::Finished(self.stream.finalize())
            }
        }
    }

    /// Drains the source without any cadence and returns the finalized parser.
    pub fn run_to_end(mut self) -> FenceStream {
        while !matches!(self.tick(), Tick::Finished(_) | Tick::Idle) {}
        self.stream
    }

    /// Stops driving and hands back the parser with whatever partial state it has.
    pub fn into_stream(self) -> FenceStream {
        self.stream
    }
}
