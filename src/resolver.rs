//! Backtick run resolution.
//!
//! Backticks are never interpreted mid-run. The resolver only counts them, and the count is
//! turned into an action once a non-backtick character (or the end of the stream) proves the
//! run is complete. Because the counter does not care where fragment boundaries fall, a fence
//! marker split as "``" + "`" resolves exactly like an unsplit one.

pub const BACKTICK: char = '`';

/// What a completed backtick run means for the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAction {
    OpenFence,
    CloseFence,
    OpenInline,
    CloseInline,
    /// Emit this many literal backticks through the normal literal path.
    Literal(usize),
}

/// What the caller should do with a character fed to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The character was a backtick and is now part of the pending run.
    Buffered,
    /// The pending run (if any) resolved to `action`; the character then follows as a literal.
    Literal {
        action: Option<RunAction>,
        ch: char,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolver {
    pending_run: usize,
    in_fence: bool,
    in_inline: bool,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_run(&self) -> usize {
        self.pending_run
    }

    pub fn in_fence(&self) -> bool {
        self.in_fence
    }

    pub fn in_inline(&self) -> bool {
        self.in_inline
    }

    pub fn feed(&mut self, ch: char) -> Step {
        if ch == BACKTICK {
            self.pending_run = self.pending_run.saturating_add(1);
            return Step::Buffered;
        }
        Step::Literal {
            action: self.resolve(),
            ch,
        }
    }

    /// Resolves a trailing run. Returns `None` when nothing is pending, so repeated calls are
    /// no-ops.
    pub fn end_of_stream(&mut self) -> Option<RunAction> {
        self.resolve()
    }

    fn resolve(&mut self) -> Option<RunAction> {
        let count = std::mem::take(&mut self.pending_run);
        match count {
            0 => None,
            1 if self.in_fence => Some(RunAction::Literal(1)),
            1 => {
                self.in_inline = !self.in_inline;
                Some(if self.in_inline {
                    RunAction::OpenInline
                } else {
                    RunAction::CloseInline
                })
            }
            // Any run of three or more toggles the fence; the exact length is not compared.
            n if n >= 3 => {
                self.in_fence = !self.in_fence;
                Some(if self.in_fence {
                    // An open inline span ends where the fence begins.
                    self.in_inline = false;
                    RunAction::OpenFence
                } else {
                    RunAction::CloseFence
                })
            }
            n => Some(RunAction::Literal(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_str(r: &mut Resolver, s: &str) -> Vec<RunAction> {
        let mut out = Vec::new();
        for ch in s.chars() {
            if let Step::Literal {
                action: Some(action),
                ..
            } = r.feed(ch)
            {
                out.push(action);
            }
        }
        out
    }

    #[test]
    fn backticks_are_buffered_until_a_non_backtick() {
        let mut r = Resolver::new();
        assert_eq!(r.feed('`'), Step::Buffered);
        assert_eq!(r.feed('`'), Step::Buffered);
        assert_eq!(r.pending_run(), 2);
        assert_eq!(
            r.feed('x'),
            Step::Literal {
                action: Some(RunAction::Literal(2)),
                ch: 'x'
            }
        );
        assert_eq!(r.pending_run(), 0);
    }

    #[test]
    fn plain_character_without_pending_run_has_no_action() {
        let mut r = Resolver::new();
        assert_eq!(r.feed('a'), Step::Literal { action: None, ch: 'a' });
    }

    #[test]
    fn single_backtick_toggles_inline() {
        let mut r = Resolver::new();
        assert_eq!(feed_str(&mut r, "`a"), vec![RunAction::OpenInline]);
        assert!(r.in_inline());
        assert_eq!(feed_str(&mut r, "`b"), vec![RunAction::CloseInline]);
        assert!(!r.in_inline());
    }

    #[test]
    fn runs_of_three_or_more_all_toggle_the_fence() {
        for n in [3usize, 4, 5, 7, 12] {
            let mut r = Resolver::new();
            let open = format!("{}x", "`".repeat(n));
            assert_eq!(feed_str(&mut r, &open), vec![RunAction::OpenFence], "n={n}");
            assert!(r.in_fence());
            assert_eq!(feed_str(&mut r, &open), vec![RunAction::CloseFence], "n={n}");
            assert!(!r.in_fence());
        }
    }

    #[test]
    fn lone_backtick_inside_fence_is_literal() {
        let mut r = Resolver::new();
        let actions = feed_str(&mut r, "```\n`x`\n");
        assert_eq!(
            actions,
            vec![
                RunAction::OpenFence,
                RunAction::Literal(1),
                RunAction::Literal(1)
            ]
        );
        assert!(r.in_fence());
        assert!(!r.in_inline());
    }

    #[test]
    fn double_backtick_is_literal_in_every_state() {
        let mut r = Resolver::new();
        assert_eq!(feed_str(&mut r, "``a"), vec![RunAction::Literal(2)]);
        feed_str(&mut r, "`a");
        assert!(r.in_inline());
        assert_eq!(feed_str(&mut r, "``a"), vec![RunAction::Literal(2)]);
        assert!(r.in_inline());
    }

    #[test]
    fn end_of_stream_resolves_once() {
        let mut r = Resolver::new();
        feed_str(&mut r, "x```");
        assert_eq!(r.pending_run(), 3);
        assert_eq!(r.end_of_stream(), Some(RunAction::OpenFence));
        assert_eq!(r.end_of_stream(), None);
        assert!(r.in_fence());
    }

    #[test]
    fn end_of_stream_without_pending_run_is_noop() {
        let mut r = Resolver::new();
        feed_str(&mut r, "abc");
        let before = r.clone();
        assert_eq!(r.end_of_stream(), None);
        assert_eq!(r, before);
    }

    #[test]
    fn fence_opened_inside_inline_code_ends_the_inline_span() {
        let mut r = Resolver::new();
        assert_eq!(
            feed_str(&mut r, "`a```b```c`d"),
            vec![
                RunAction::OpenInline,
                RunAction::OpenFence,
                RunAction::CloseFence,
                RunAction::OpenInline
            ]
        );
        assert!(r.in_inline());
    }

    #[test]
    fn fence_and_inline_are_never_both_active() {
        let mut r = Resolver::new();
        for ch in "a`b```c`d``e```f`g".chars() {
            r.feed(ch);
            assert!(!(r.in_fence() && r.in_inline()));
        }
    }
}
