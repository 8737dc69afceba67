// Last known pointer position, written only by the pointer-move handler.
// `moving` drops back to false once `idle_ms` pass without a move; nothing reads it yet

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    pub pos: [f64; 2],
    pub moving: bool,
    pub last_move_ms: f64,
}

impl PointerState {
    pub fn record(&mut self, x: f64, y: f64, now_ms: f64) {
        self.pos = [x, y];
        self.moving = true;
        self.last_move_ms = now_ms;
    }

    pub fn refresh_idle(&mut self, now_ms: f64, idle_ms: f64) {
        if now_ms - self.last_move_ms > idle_ms {
            self.moving = false;
        }
    }
}
