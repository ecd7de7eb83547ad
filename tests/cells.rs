use vorowkt::{
    cell_record, check_reciprocity, compute_voronoi, extract_faces, extract_rings, BoundingBox, CellError, Container,
    ContainerConfig, FaceStyle, HalfEdgeCell, HalfEdgeTable, Point3, Tessellation, TopologyError, BOX_ID_LEFT,
};

fn signed_volume(rings: &[Vec<Point3>]) -> f64 {
    rings
        .iter()
        .flat_map(|r| r[1..r.len() - 1].windows(2).map(move |w| r[0].dot(&w[0].cross(&w[1])) / 6.0))
        .sum()
}

/// Unit corner tetrahedron with outward counter-clockwise faces.
fn tetrahedron() -> HalfEdgeTable {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];
    let adjacency = vec![vec![1, 2, 3], vec![0, 3, 2], vec![0, 1, 3], vec![0, 2, 1]];
    HalfEdgeTable::from_adjacency(vertices, &adjacency).unwrap()
}

#[test]
fn test_tetrahedron_faces() {
    let tet = tetrahedron();
    assert_eq!(tet.half_edge_count(), 12);
    assert!(check_reciprocity(&tet).is_ok());

    let faces = extract_faces(&tet).unwrap();
    assert_eq!(faces.len(), 4);
    assert!(faces.iter().all(|f| f.vertices.len() == 3));

    let rings = extract_rings(&tet, FaceStyle::Triangles).unwrap();
    assert!((signed_volume(&rings) - 1.0 / 6.0).abs() < 1e-12);
}

#[test]
fn test_tetrahedron_record() {
    let record = cell_record(&tetrahedron(), FaceStyle::Polygons).unwrap();
    assert!(record.starts_with("POLYHEDRALSURFACE((("));
    assert_eq!(record.matches("((").count(), 4);
    assert_eq!(record.matches(", ").count(), 4 * 3 + 3);
}

#[test]
fn test_broken_table_is_rejected() {
    let vertices = vec![Point3::default(); 4];
    let adjacency = vec![vec![1, 2, 7], vec![0, 3, 2], vec![0, 1, 3], vec![0, 2, 1]];
    let err = HalfEdgeTable::from_adjacency(vertices, &adjacency).unwrap_err();
    assert_eq!(err, TopologyError::DanglingEdge { vertex: 0, slot: 2, target: 7 });
}

#[test]
fn test_tessellation_matches_compute_voronoi() {
    let x = [1.0, 4.0, 2.5, 8.0, 6.0];
    let y = [2.0, 7.0, 5.0, 1.0, 9.0];
    let z = [3.0, 1.0, 8.0, 6.0, 4.0];
    let ratio = 1.4;

    let container = Container::fit(&x, &y, &z, &ContainerConfig::default().with_ratio(ratio)).unwrap();
    let mut tess = Tessellation::new(container);
    tess.set_points((0..5).map(|i| [x[i], y[i], z[i]]).collect());
    assert_eq!(tess.count_points(), 5);

    let expected = compute_voronoi(&x, &y, &z, ratio).unwrap();
    for (i, record) in expected.iter().enumerate() {
        let cell = tess.compute_cell(i).unwrap();
        assert_eq!(cell.id(), i);
        assert_eq!(cell.generator(), Point3::new(x[i], y[i], z[i]));
        assert_eq!(record.as_deref(), Some(cell_record(&cell, FaceStyle::Triangles).unwrap().as_str()));
    }
}

#[test]
fn test_neighbor_faces() {
    let container = Container {
        bounds: BoundingBox::new([0.0; 3], [10.0; 3]),
        divisions: [2, 2, 2],
    };
    let mut tess = Tessellation::new(container);
    tess.set_points(vec![[2.0, 5.0, 5.0], [8.0, 5.0, 5.0]]);

    let left = tess.compute_cell(0).unwrap();
    assert!(left.face_ids().contains(&1));
    assert!(left.face_ids().contains(&BOX_ID_LEFT));

    let right = tess.compute_cell(1).unwrap();
    assert!(right.face_ids().contains(&0));
    assert!(!right.face_ids().contains(&BOX_ID_LEFT));
}

#[test]
fn test_map_reports_failures_per_cell() {
    let container = Container {
        bounds: BoundingBox::new([0.0; 3], [10.0; 3]),
        divisions: [1, 1, 1],
    };
    let mut tess = Tessellation::new(container);
    tess.set_points(vec![[5.0, 5.0, 5.0], [5.0, 5.0, 5.0], [1.0, 1.0, 1.0]]);

    let mut results = tess.map(|_, cell| cell.map(|c| c.id()));
    results.sort_by_key(|(i, _)| *i);
    assert_eq!(results[0].1, Err(CellError::Coincident { id: 0, other: 1 }));
    assert_eq!(results[1].1, Err(CellError::Coincident { id: 1, other: 0 }));
    assert_eq!(results[2].1, Ok(2));
}
