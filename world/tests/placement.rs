use glam::Vec2;
use harbor_core::{
    BuildingKind, CellCoord, Command, EntityId, Footprint, GroundId, LayerKind, Location,
    PlacementError, UnitKind,
};
use harbor_world::{
    apply,
    layers::{GridLayer, MetricKind},
    placement::{can_place, check_placement},
    query, World,
};

fn two_by_two() -> Footprint {
    Footprint::new(2, 2).expect("valid footprint")
}

fn origin() -> Location {
    Location::at_cell(LayerKind::Units, CellCoord::new(10, 10))
}

fn covered_cells() -> [CellCoord; 4] {
    [
        CellCoord::new(10, 10),
        CellCoord::new(10, 11),
        CellCoord::new(11, 10),
        CellCoord::new(11, 11),
    ]
}

fn terrain_at(cells: &[CellCoord]) -> GridLayer {
    let mut layer = GridLayer::new(LayerKind::Land, MetricKind::Euclidean);
    for (index, cell) in cells.iter().enumerate() {
        let _ = layer
            .insert(
                EntityId::new(index as u64),
                Location::at_cell(LayerKind::Land, *cell),
                Footprint::SINGLE,
            )
            .expect("terrain placement succeeds");
    }
    layer
}

#[test]
fn footprint_on_empty_terrain_is_rejected_until_ground_exists() {
    let units = GridLayer::new(LayerKind::Units, MetricKind::Euclidean);
    let empty = terrain_at(&[]);

    assert!(
        !can_place(two_by_two(), &origin(), None, &empty, &units, None),
        "a footprint without ground beneath it must be rejected"
    );

    let partial = terrain_at(&covered_cells()[..3]);
    assert_eq!(
        check_placement(two_by_two(), &origin(), None, &partial, &units, None),
        Err(PlacementError::MissingTerrain {
            cell: CellCoord::new(11, 11)
        }),
        "the single missing cell should be reported"
    );

    let full = terrain_at(&covered_cells());
    assert!(
        can_place(two_by_two(), &origin(), None, &full, &units, None),
        "ground under all four cells makes the site legal"
    );
}

#[test]
fn unit_on_any_covered_cell_blocks_the_footprint() {
    let terrain = terrain_at(&covered_cells());
    let mut units = GridLayer::new(LayerKind::Units, MetricKind::Euclidean);
    let _ = units
        .insert(
            EntityId::new(100),
            Location::at_cell(LayerKind::Units, CellCoord::new(11, 11)),
            Footprint::SINGLE,
        )
        .expect("unit placement succeeds");

    assert!(!can_place(two_by_two(), &origin(), None, &terrain, &units, None));
    assert_eq!(
        check_placement(two_by_two(), &origin(), None, &terrain, &units, None),
        Err(PlacementError::Occupied {
            cell: CellCoord::new(11, 11),
            by: EntityId::new(100),
        })
    );
}

#[test]
fn world_placement_matches_the_standalone_check() {
    let mut world = World::new();
    let mut events = Vec::new();
    let location = Location::at_cell(LayerKind::Units, CellCoord::new(10, 10));

    assert!(!query::can_place(&world, BuildingKind::Lumberjack, &location));

    for cell in covered_cells() {
        apply(
            &mut world,
            Command::PlaceTerrain {
                layer: LayerKind::Land,
                cell,
                ground: GroundId::GRASS,
            },
            &mut events,
        );
    }
    assert!(query::can_place(&world, BuildingKind::Lumberjack, &location));

    apply(
        &mut world,
        Command::SpawnUnit {
            kind: UnitKind::Ship,
            name: "Matilde".to_owned(),
            location: Location::new(LayerKind::Units, Vec2::new(11.5, 11.5)),
        },
        &mut events,
    );
    assert!(
        !query::can_place(&world, BuildingKind::Lumberjack, &location),
        "the ship at (11, 11) should block the lumberjack"
    );
}

#[test]
fn in_radius_uses_an_inclusive_euclidean_bound() {
    let world = World::new();
    let origin = Location::new(LayerKind::Land, Vec2::ZERO);
    let point = Location::new(LayerKind::Land, Vec2::new(3.0, 4.0));

    assert!(query::in_radius(&world, &origin, &point, 5.0));
    assert!(!query::in_radius(&world, &origin, &point, 4.0));
}

#[test]
fn fisher_requires_open_water_next_to_it() {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::AddIsland {
            offset: CellCoord::new(0, 0),
            tiles: (0..3)
                .flat_map(|column| (0..3).map(move |row| CellCoord::new(column, row)))
                .collect(),
        },
        &mut events,
    );
    apply(&mut world, Command::FloodWater { margin: 2 }, &mut events);

    let inland = Location::at_cell(LayerKind::Units, CellCoord::new(1, 1));
    let shore = Location::at_cell(LayerKind::Units, CellCoord::new(0, 1));

    assert_eq!(
        query::check_build(&world, BuildingKind::Fisher, &inland),
        Err(PlacementError::NotOnCoast)
    );
    assert_eq!(query::check_build(&world, BuildingKind::Fisher, &shore), Ok(()));
    assert!(
        query::can_place(&world, BuildingKind::Church, &Location::at_cell(
            LayerKind::Units,
            CellCoord::new(0, 0)
        )),
        "inland buildings have no coast requirement"
    );
}
