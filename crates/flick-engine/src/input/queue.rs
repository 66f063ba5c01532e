/// Host input, already converted to world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// HUD buttons and other UI commands; the meaning of `kind` and the
    /// payload is up to the game.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events pushed by the host between frames, read in push order by the next
/// fixed tick and then drained by the runner.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Take every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InputEvent> {
        self.pending.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl FromIterator<InputEvent> for InputQueue {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        Self {
            pending: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_queue() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerDown { x: 160.0, y: 632.0 });
        queue.push(InputEvent::KeyDown { key_code: 82 });
        assert_eq!(queue.len(), 2);

        let taken = queue.drain();
        assert_eq!(taken[1], InputEvent::KeyDown { key_code: 82 });
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn drag_reads_back_in_push_order() {
        let queue: InputQueue = [
            InputEvent::PointerDown { x: 1.0, y: 1.0 },
            InputEvent::PointerMove { x: 2.0, y: 2.0 },
            InputEvent::PointerUp { x: 3.0, y: 3.0 },
        ]
        .into_iter()
        .collect();
        let xs: Vec<f32> = queue
            .iter()
            .filter_map(|e| match *e {
                InputEvent::PointerDown { x, .. }
                | InputEvent::PointerMove { x, .. }
                | InputEvent::PointerUp { x, .. } => Some(x),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }
}
