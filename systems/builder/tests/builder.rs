use glam::Vec2;
use harbor_core::{Command, EntityId, Event, LayerKind, Location, PlayMode};
use harbor_system_builder::{Builder, BuilderInput};

fn cursor(x: f32, y: f32) -> Option<Location> {
    Some(Location::new(LayerKind::Units, Vec2::new(x, y)))
}

fn enter_build() -> [Event; 1] {
    [Event::ModeChanged {
        mode: PlayMode::Build,
    }]
}

#[test]
fn primary_selects_under_cursor_in_command_mode() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        BuilderInput {
            primary_action: true,
            cursor: cursor(3.5, 4.5),
            ..BuilderInput::default()
        },
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::Select {
            location: Location::new(LayerKind::Units, Vec2::new(3.5, 4.5)),
        }],
        "command mode clicks should select",
    );
}

#[test]
fn primary_without_cursor_deselects() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(&[], BuilderInput::new(true, false, None), &mut commands);

    assert_eq!(commands, vec![Command::Deselect]);
}

#[test]
fn secondary_without_selection_does_nothing() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(&[], BuilderInput::new(false, true, cursor(1.0, 1.0)), &mut commands);

    assert!(commands.is_empty(), "nothing is selected to move");
}

#[test]
fn secondary_orders_the_selection_to_the_cursor() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();
    let ship = EntityId::new(4);

    builder.handle(
        &[Event::SelectionChanged { entity: Some(ship) }],
        BuilderInput::new(false, true, cursor(8.5, 2.5)),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::MoveUnit {
            unit: ship,
            location: Location::new(LayerKind::Units, Vec2::new(8.5, 2.5)),
        }]
    );
}

#[test]
fn deselection_ends_move_orders() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[
            Event::SelectionChanged {
                entity: Some(EntityId::new(4)),
            },
            Event::SelectionChanged { entity: None },
        ],
        BuilderInput::new(false, true, cursor(8.5, 2.5)),
        &mut commands,
    );
    builder.handle(
        &[Event::SelectionChanged {
            entity: Some(EntityId::new(4)),
        }],
        BuilderInput::new(false, true, None),
        &mut commands,
    );

    assert!(
        commands.is_empty(),
        "move orders need both a selection and a cursor"
    );
}

#[test]
fn cursor_changes_drag_the_candidate_in_build_mode() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(&enter_build(), BuilderInput::new(false, false, cursor(2.0, 2.0)), &mut commands);
    builder.handle(&[], BuilderInput::new(false, false, cursor(2.0, 2.0)), &mut commands);
    builder.handle(&[], BuilderInput::new(false, false, None), &mut commands);
    builder.handle(&[], BuilderInput::new(false, false, cursor(5.0, 2.0)), &mut commands);

    assert_eq!(builder.play_mode(), PlayMode::Build);
    assert_eq!(
        commands,
        vec![
            Command::MoveCandidate {
                location: Location::new(LayerKind::Units, Vec2::new(2.0, 2.0)),
            },
            Command::MoveCandidate {
                location: Location::new(LayerKind::Units, Vec2::new(5.0, 2.0)),
            },
        ],
        "unchanged or missing cursors must not emit moves",
    );
}

#[test]
fn primary_confirms_at_cursor_in_build_mode() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(&enter_build(), BuilderInput::new(true, false, cursor(6.0, 7.0)), &mut commands);

    let location = Location::new(LayerKind::Units, Vec2::new(6.0, 7.0));
    assert_eq!(
        commands,
        vec![
            Command::MoveCandidate { location },
            Command::ConfirmBuild { location },
        ]
    );
}

#[test]
fn secondary_cancels_the_build() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(&enter_build(), BuilderInput::new(true, true, None), &mut commands);

    assert_eq!(
        commands,
        vec![Command::CancelBuild],
        "cancel wins over a simultaneous confirm",
    );
}

#[test]
fn returning_to_command_mode_stops_build_dispatch() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[
            Event::ModeChanged {
                mode: PlayMode::Build,
            },
            Event::ModeChanged {
                mode: PlayMode::Command,
            },
        ],
        BuilderInput::new(false, true, cursor(1.0, 1.0)),
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(builder.play_mode(), PlayMode::Command);
}
