use clothy::{ClothConfig, ClothMesh, Pointer, PointerButton, Vec2};

fn run(frames: usize) -> (Vec<f32>, Vec<u32>) {
    let mut cloth: ClothMesh<f32> = ClothMesh::new(ClothConfig::new().with_grid(30, 15)).unwrap();
    let mut pointer = Pointer::idle();
    pointer.move_to(Vec2::new(-0.6, 0.5));

    for frame in 0..frames {
        // Drag for a while, then switch to cutting on the way back.
        match frame {
            20 => pointer.press(PointerButton::Drag),
            60 => pointer.press(PointerButton::Other),
            100 => pointer.release(),
            _ => {}
        }
        let t = frame as f32 / frames as f32;
        pointer.move_to(Vec2::new(-0.6 + 1.2 * t, 0.5 - 0.4 * t));
        cloth.update(1.0 / 60.0, &pointer).unwrap();
    }

    (cloth.positions().to_vec(), cloth.indices().to_vec())
}

#[test]
fn cloth_deterministic() {
    let results: Vec<_> = (0..5).map(|_| run(120)).collect();

    for (positions, indices) in &results[1..] {
        assert_eq!(&results[0].0, positions);
        assert_eq!(&results[0].1, indices);
    }
}

#[test]
fn reset_replays_identically() {
    let mut cloth: ClothMesh<f64> = ClothMesh::new(ClothConfig::new().with_grid(12, 8)).unwrap();
    let pointer = Pointer::pressed_at(Vec2::new(0.0, 0.6), PointerButton::Other);

    for _ in 0..30 {
        cloth.update(1.0 / 60.0, &pointer).unwrap();
    }
    let first = (cloth.positions().to_vec(), cloth.indices().to_vec());

    cloth.reset();
    for _ in 0..30 {
        cloth.update(1.0 / 60.0, &pointer).unwrap();
    }

    assert_eq!(first.0, cloth.positions());
    assert_eq!(first.1, cloth.indices());
}
