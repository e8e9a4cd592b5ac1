use panorama_core::gesture::{InputEvent, TouchPoint};

/// Fingers currently on the surface, keyed by egui's touch id.
///
/// egui reports one finger per event; the viewer wants the full set of
/// active fingers with every start, move and end.
#[derive(Default)]
pub struct TouchTracker {
    active: Vec<(egui::TouchId, TouchPoint)>,
}

impl TouchTracker {
    pub fn is_active(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn apply(
        &mut self,
        id: egui::TouchId,
        phase: egui::TouchPhase,
        point: TouchPoint,
    ) -> Option<InputEvent> {
        let known = self.active.iter().position(|(active, _)| *active == id);
        match phase {
            egui::TouchPhase::Start => {
                match known {
                    Some(i) => self.active[i].1 = point,
                    None => self.active.push((id, point)),
                }
                Some(InputEvent::TouchStart {
                    touches: self.points(),
                })
            }
            egui::TouchPhase::Move => {
                let i = known?;
                self.active[i].1 = point;
                Some(InputEvent::TouchMove {
                    touches: self.points(),
                })
            }
            egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                self.active.remove(known?);
                Some(InputEvent::TouchEnd {
                    remaining: self.points(),
                })
            }
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    fn points(&self) -> Vec<TouchPoint> {
        self.active.iter().map(|(_, p)| *p).collect()
    }
}
