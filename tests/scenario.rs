use hitshape::{
    broad::{Axis, Broadphase, Grid, Sweep},
    Aabb, CollisionType, Fp, Polygon, PolygonOptions, Vec2,
};

fn square(min: Vec2, side: Fp) -> Polygon {
    let unit = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];
    let opts = PolygonOptions {
        position: min,
        scale: Vec2::new(side, side),
        ..Default::default()
    };
    Polygon::with_options(&unit, opts).unwrap()
}

fn pairs<B: Broadphase<Polygon>>(broadphase: &mut B, polys: &mut [Polygon]) -> Vec<(usize, usize)> {
    broadphase.query(polys).map(|p| p.sorted_indices()).collect()
}

#[test]
fn only_overlapping_squares_are_candidates() {
    let mut polys = vec![
        square(Vec2::new(0.0, 0.0), 2.0),
        square(Vec2::new(1.0, 1.0), 2.0),
        square(Vec2::new(10.0, 10.0), 2.0),
    ];

    assert_eq!(pairs(&mut Sweep::default(), &mut polys), vec![(0, 1)]);
    assert_eq!(pairs(&mut Sweep::new(Axis::Y), &mut polys), vec![(0, 1)]);
    assert_eq!(pairs(&mut Grid::new(4.0), &mut polys), vec![(0, 1)]);

    // narrow phase: confirm the candidate with the shapes themselves
    let mut sweep = Sweep::default();
    let pair = sweep.query(&mut polys[..]).next().unwrap();
    let (a, b) = pair.sorted_indices();
    assert_eq!((a, b), (0, 1));
    assert!(polys[a].contains_point(Vec2::new(1.5, 1.5)));
    assert!(polys[b].contains_point(Vec2::new(1.5, 1.5)));
}

#[test]
fn moving_a_shape_changes_the_candidates() {
    let mut polys = vec![
        square(Vec2::new(0.0, 0.0), 2.0),
        square(Vec2::new(1.0, 1.0), 2.0),
        square(Vec2::new(10.0, 10.0), 2.0),
    ];
    let mut sweep = Sweep::default();
    assert_eq!(pairs(&mut sweep, &mut polys), vec![(0, 1)]);

    polys[2].transform.position = Vec2::new(2.5, 2.5);
    assert_eq!(pairs(&mut sweep, &mut polys), vec![(0, 1), (1, 2)]);

    polys[1].transform.position = Vec2::new(50.0, 50.0);
    assert!(pairs(&mut sweep, &mut polys).is_empty());

    polys[1].set_collision_type(CollisionType::Inactive);
    polys[1].transform.position = Vec2::new(1.0, 1.0);
    assert!(pairs(&mut sweep, &mut polys).is_empty());
}

#[test]
fn plain_boxes_are_hitboxes() {
    let mut boxes = vec![
        Aabb::new(0.0, 0.0, 2.0, 2.0),
        Aabb::new(1.0, 1.0, 3.0, 3.0),
        Aabb::new(10.0, 10.0, 12.0, 12.0),
    ];
    let found = Grid::default().query(&mut boxes[..]).map(|p| p.indices()).collect::<Vec<_>>();
    assert_eq!(found, vec![(0, 1)]);
}
