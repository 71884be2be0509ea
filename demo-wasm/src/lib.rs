use clothy::{ClothConfig, ClothMesh, Pointer, PointerButton};
use wasm_bindgen::prelude::*;

// ---- Cloth Demo ----

/// Browser glue: canvas events in, vertex and index buffers out.
#[wasm_bindgen]
pub struct ClothDemo {
    cloth: ClothMesh<f32>,
    pointer: Pointer<f32>,
}

#[wasm_bindgen]
impl ClothDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(cloth_x: usize, cloth_y: usize) -> Result<ClothDemo, JsError> {
        let cloth = ClothMesh::new(ClothConfig::new().with_grid(cloth_x, cloth_y))?;
        Ok(ClothDemo { cloth, pointer: Pointer::idle() })
    }

    /// `button` follows `MouseEvent.which`: 1 drags, anything else cuts.
    pub fn pointer_down(&mut self, x: f32, y: f32, width: f32, height: f32, button: u32) {
        let button = if button == 1 { PointerButton::Drag } else { PointerButton::Other };
        self.pointer.press(button);
        self.pointer.move_to_screen(x, y, width, height);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.pointer.move_to_screen(x, y, width, height);
    }

    pub fn pointer_up(&mut self) {
        self.pointer.release();
    }

    /// `dt` in seconds; frame hitches are capped by the engine.
    pub fn update(&mut self, dt: f32) -> Result<(), JsError> {
        self.cloth.update(dt, &self.pointer)?;
        Ok(())
    }

    /// Keyboard handler: `r` rebuilds the cloth, `g` toggles gravity.
    pub fn key(&mut self, key: &str) {
        match key {
            "r" => self.cloth.reset(),
            "g" => {
                self.cloth.toggle_gravity();
            }
            _ => {}
        }
    }

    /// Returns flat [x0, y0, z0, x1, ...] in row-major order
    pub fn positions(&self) -> Vec<f32> {
        self.cloth.positions().to_vec()
    }

    /// Triangle indices; upload when `take_indices_dirty` reports a change.
    pub fn indices(&self) -> Vec<u32> {
        self.cloth.indices().to_vec()
    }

    pub fn take_indices_dirty(&mut self) -> bool {
        self.cloth.take_indices_dirty()
    }

    pub fn particle_count(&self) -> usize {
        self.cloth.particle_count()
    }
}
