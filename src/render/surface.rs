//! Schnittstelle zur Karten-Render-Oberfläche.

use super::graphic::{Graphic, GraphicId};

/// Abstraktion über die konkrete Karten-Darstellung.
///
/// Das Overlay kennt nur diese schmale Schnittstelle: Grafiken einfügen,
/// aktualisieren, entfernen und die Zeichenreihenfolge setzen. Die
/// konkrete Render-Technik (Kachel-Karte, GPU, Test-Attrappe) bleibt
/// dem Host überlassen.
pub trait MapSurface {
    /// Fügt eine neue Grafik hinzu.
    fn add_graphic(&mut self, graphic: &Graphic);

    /// Aktualisiert eine bestehende Grafik (Position, Rotation, Selektion).
    fn update_graphic(&mut self, graphic: &Graphic);

    /// Entfernt eine Grafik.
    fn remove_graphic(&mut self, id: GraphicId);

    /// Wendet die komplette Zeichenreihenfolge an (später = weiter oben).
    fn apply_draw_order(&mut self, order: &[GraphicId]);
}

/// Eine vom [`RecordingSurface`] aufgezeichnete Operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Add(GraphicId),
    Update(GraphicId),
    Remove(GraphicId),
    ApplyOrder(Vec<GraphicId>),
}

/// Test-Oberfläche, die alle Operationen aufzeichnet.
///
/// Hält zusätzlich die zuletzt angewandte Reihenfolge vor, damit Tests
/// das Endergebnis direkt prüfen können.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Alle Operationen in Aufruf-Reihenfolge
    pub ops: Vec<SurfaceOp>,
    /// Zuletzt angewandte Zeichenreihenfolge
    pub current_order: Vec<GraphicId>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl der bislang angewandten Reihenfolgen.
    pub fn order_applications(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::ApplyOrder(_)))
            .count()
    }
}

impl MapSurface for RecordingSurface {
    fn add_graphic(&mut self, graphic: &Graphic) {
        self.ops.push(SurfaceOp::Add(graphic.id));
    }

    fn update_graphic(&mut self, graphic: &Graphic) {
        self.ops.push(SurfaceOp::Update(graphic.id));
    }

    fn remove_graphic(&mut self, id: GraphicId) {
        self.ops.push(SurfaceOp::Remove(id));
    }

    fn apply_draw_order(&mut self, order: &[GraphicId]) {
        self.ops.push(SurfaceOp::ApplyOrder(order.to_vec()));
        self.current_order = order.to_vec();
    }
}
