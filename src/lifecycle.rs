// Mount state of a particle field plus the one animation frame request it may have
// outstanding. Teardown hands the pending request back exactly once

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Active,
    TornDown,
}

#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
    pending_frame: Option<i32>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Lifecycle {
            phase: Phase::Uninitialized,
            pending_frame: None,
        }
    }
}

impl Lifecycle {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn pending_frame(&self) -> Option<i32> {
        self.pending_frame
    }

    // Returns false if the field was already torn down, a torn down field never restarts
    pub fn activate(&mut self) -> bool {
        match self.phase {
            Phase::Uninitialized => {
                self.phase = Phase::Active;
                true
            }
            Phase::Active => true,
            Phase::TornDown => false,
        }
    }

    // Called when the frame callback starts running, its request is no longer pending
    pub fn frame_fired(&mut self) {
        self.pending_frame = None;
    }

    pub fn frame_requested(&mut self, id: i32) {
        self.pending_frame = Some(id);
    }

    // Moves to TornDown. Only the first call out of Active yields the frame id to cancel
    pub fn teardown(&mut self) -> Option<i32> {
        let was_active = self.phase == Phase::Active;
        self.phase = Phase::TornDown;
        let pending = self.pending_frame.take();
        if was_active {
            pending
        } else {
            None
        }
    }
}
