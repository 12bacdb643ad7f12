#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input-dispatch system that turns pointer and button input into
//! selection and build commands according to the current play mode.

use harbor_core::{Command, EntityId, Event, Location, PlayMode};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuilderInput {
    /// Indicates whether the primary button was pressed on this frame.
    pub primary_action: bool,
    /// Indicates whether the secondary button was pressed on this frame.
    pub secondary_action: bool,
    /// Map location under the pointer, if the pointer is over the map.
    pub cursor: Option<Location>,
}

impl BuilderInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(primary_action: bool, secondary_action: bool, cursor: Option<Location>) -> Self {
        Self {
            primary_action,
            secondary_action,
            cursor,
        }
    }
}

/// Mode-aware system that translates frame input into world commands.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    play_mode: PlayMode,
    last_cursor: Option<Location>,
    selection: Option<EntityId>,
}

impl Builder {
    /// Creates a new builder system instance in command mode.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            play_mode: PlayMode::Command,
            last_cursor: None,
            selection: None,
        }
    }

    /// Mode the system currently dispatches for.
    #[must_use]
    pub const fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    /// Consumes world events and adapter-derived input to emit commands.
    ///
    /// In command mode the primary action selects whatever lies under the
    /// cursor and the secondary action orders the selection to the cursor.
    /// In build mode pointer movement drags the candidate, the
    /// primary action confirms it and the secondary action cancels.
    pub fn handle(&mut self, events: &[Event], input: BuilderInput, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::ModeChanged { mode } => {
                    self.play_mode = *mode;
                    self.last_cursor = None;
                }
                Event::SelectionChanged { entity } => self.selection = *entity,
                _ => {}
            }
        }

        match self.play_mode {
            PlayMode::Command => {
                if input.primary_action {
                    out.push(match input.cursor {
                        Some(location) => Command::Select { location },
                        None => Command::Deselect,
                    });
                } else if input.secondary_action {
                    if let (Some(unit), Some(location)) = (self.selection, input.cursor) {
                        out.push(Command::MoveUnit { unit, location });
                    }
                }
            }
            PlayMode::Build => {
                if let Some(location) = input.cursor {
                    if self.last_cursor != Some(location) {
                        out.push(Command::MoveCandidate { location });
                    }
                }
                self.last_cursor = input.cursor.or(self.last_cursor);

                if input.secondary_action {
                    out.push(Command::CancelBuild);
                } else if input.primary_action {
                    if let Some(location) = input.cursor {
                        out.push(Command::ConfirmBuild { location });
                    }
                }
            }
        }
    }
}
