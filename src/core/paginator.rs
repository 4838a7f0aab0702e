//! Page navigation state machine.
//!
//! A [`Paginator`] owns a fixed, non-empty sequence of [`Page`]s and a cursor.
//! Navigation uses the clamp-at-bound policy: `previous` on the first page and
//! `next` on the last page leave the cursor where it is, and the matching
//! controls are reported as disabled, so button state and handler behaviour
//! always agree.
//!
//! There is no explicit idle state; a session is idle until a `Paginator`
//! value exists, which [`Paginator::new`] refuses to build from zero pages.

use crate::errors::{Error, Result};

/// One pre-rendered unit of paginated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Heading shown above the content
    pub title: String,
    /// Body text
    pub description: Option<String>,
    /// Image shown below the body
    pub image_url: Option<String>,
    /// Zero-based position within its session
    pub position: usize,
}

/// Navigation requests a user can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum NavEvent {
    /// Jump to the first page
    First = 0,
    /// Step back one page
    Previous = 1,
    /// Step forward one page
    Next = 2,
    /// Jump to the last page
    Last = 3,
}

impl NavEvent {
    /// Every event, in display order.
    pub const ALL: [Self; 4] = [Self::First, Self::Previous, Self::Next, Self::Last];

    /// Slot of this event in the dispatch table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier used in component ids.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Previous => "previous",
            Self::Next => "next",
            Self::Last => "last",
        }
    }

    /// Parses an identifier produced by [`NavEvent::id`].
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.id() == id)
    }
}

/// Computes the next cursor from `(cursor, page_count)`.
type Handler = fn(usize, usize) -> usize;

const fn to_first(_cursor: usize, _pages: usize) -> usize {
    0
}

const fn to_previous(cursor: usize, _pages: usize) -> usize {
    cursor.saturating_sub(1)
}

fn to_next(cursor: usize, pages: usize) -> usize {
    (cursor + 1).min(pages - 1)
}

const fn to_last(_cursor: usize, pages: usize) -> usize {
    pages - 1
}

/// Event dispatch table, one handler per [`NavEvent`] slot. The host event
/// loop resolves an event here instead of calling per-button callbacks.
const DISPATCH: [Handler; 4] = [to_first, to_previous, to_next, to_last];

const fn handler_for(event: NavEvent) -> Handler {
    DISPATCH[event.index()]
}

/// Lifecycle of a pagination session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting navigation, showing the page at `cursor`
    Active {
        /// Index of the displayed page
        cursor: usize,
    },
    /// Timed out or closed; navigation is refused
    Expired,
}

/// Why a navigation request changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The session is restricted and the actor is not its owner
    NotOwner,
    /// The session has expired
    Expired,
}

/// What the host should draw for the navigation controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    /// `<<` is inactive
    pub first_disabled: bool,
    /// `<` is inactive
    pub previous_disabled: bool,
    /// `>` is inactive
    pub next_disabled: bool,
    /// `>>` is inactive
    pub last_disabled: bool,
    /// Counter label, `"{cursor + 1}/{page count}"`
    pub counter: String,
}

impl Controls {
    /// Whether the control for `event` is inactive.
    #[must_use]
    pub const fn is_disabled(&self, event: NavEvent) -> bool {
        match event {
            NavEvent::First => self.first_disabled,
            NavEvent::Previous => self.previous_disabled,
            NavEvent::Next => self.next_disabled,
            NavEvent::Last => self.last_disabled,
        }
    }
}

/// Cursor over a fixed sequence of pages.
#[derive(Debug, Clone)]
pub struct Paginator {
    pages: Vec<Page>,
    state: SessionState,
    owner: u64,
    restricted: bool,
    last_cursor: usize,
}

impl Paginator {
    /// Starts a session on the first page, owned by `owner`.
    ///
    /// # Errors
    /// Returns [`Error::EmptyPages`] when `pages` is empty.
    pub fn new(pages: Vec<Page>, owner: u64) -> Result<Self> {
        if pages.is_empty() {
            return Err(Error::EmptyPages);
        }
        Ok(Self {
            pages,
            state: SessionState::Active { cursor: 0 },
            owner,
            restricted: false,
            last_cursor: 0,
        })
    }

    /// Moves the starting cursor, clamped to the last page.
    #[must_use]
    pub fn starting_at(mut self, page: usize) -> Self {
        let cursor = page.min(self.pages.len() - 1);
        if let SessionState::Active { .. } = self.state {
            self.state = SessionState::Active { cursor };
        }
        self.last_cursor = cursor;
        self
    }

    /// Only the owner may navigate a restricted session.
    #[must_use]
    pub const fn restricted(mut self, restricted: bool) -> Self {
        self.restricted = restricted;
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Index of the displayed page; the last shown page once expired.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        match self.state {
            SessionState::Active { cursor } => cursor,
            SessionState::Expired => self.last_cursor,
        }
    }

    /// Number of pages in the session.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The displayed page.
    #[must_use]
    pub fn current_page(&self) -> &Page {
        &self.pages[self.cursor()]
    }

    /// Applies `event` on behalf of `actor` and returns the new cursor.
    ///
    /// # Errors
    /// Returns a [`Rejection`] and leaves the state untouched when the session
    /// has expired or `actor` may not navigate it.
    pub fn navigate(&mut self, actor: u64, event: NavEvent) -> std::result::Result<usize, Rejection> {
        let SessionState::Active { cursor } = self.state else {
            return Err(Rejection::Expired);
        };
        if self.restricted && actor != self.owner {
            return Err(Rejection::NotOwner);
        }

        let next = handler_for(event)(cursor, self.pages.len());
        self.state = SessionState::Active { cursor: next };
        self.last_cursor = next;
        Ok(next)
    }

    /// Ends the session. Further navigation is rejected.
    pub fn expire(&mut self) {
        self.last_cursor = self.cursor();
        self.state = SessionState::Expired;
    }

    /// Control state for the current cursor. Everything is disabled once the
    /// session has expired.
    #[must_use]
    pub fn controls(&self) -> Controls {
        let cursor = self.cursor();
        let last = self.pages.len() - 1;
        let expired = self.state == SessionState::Expired;
        Controls {
            first_disabled: expired || cursor == 0,
            previous_disabled: expired || cursor == 0,
            next_disabled: expired || cursor == last,
            last_disabled: expired || cursor == last,
            counter: format!("{}/{}", cursor + 1, self.pages.len()),
        }
    }
}
