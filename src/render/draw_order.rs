//! Deterministische Zeichenreihenfolge für das Karten-Overlay.
//!
//! Die Reihenfolge dient doppelt: späteres Element = weiter oben gezeichnet
//! und zuerst vom Hit-Test getroffen. Der Algorithmus ist eine reine
//! Funktion über (Grafik-Menge, Selektion) und damit direkt testbar.

use super::graphic::{Graphic, GraphicId, GraphicKind};
use indexmap::IndexMap;

/// Die vier statischen Ebenen, von unten nach oben.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Layer {
    /// Strecken-Linien zwischen Wegpunkten
    WayPointLines,
    /// Wegpunkt-zu-POI-Linien
    PoiLines,
    /// POI-Marker und -Labels
    PoiVisuals,
    /// Wegpunkt-Marker, -Labels, -Pfeile, Einfüge-Marker
    WayPointVisuals,
    /// Positions-Anzeigen (Bediener, Drohne) — immer zuoberst
    LiveLocations,
}

fn layer(kind: &GraphicKind) -> Layer {
    match kind {
        GraphicKind::WayPointLine { .. } => Layer::WayPointLines,
        GraphicKind::WayPointToPoiLine { .. } => Layer::PoiLines,
        GraphicKind::PoiMarker { .. } | GraphicKind::PoiLabel { .. } => Layer::PoiVisuals,
        GraphicKind::WayPointMarker { .. }
        | GraphicKind::WayPointLabel { .. }
        | GraphicKind::WayPointArrow { .. }
        | GraphicKind::InsertMarker { .. } => Layer::WayPointVisuals,
        GraphicKind::UserLocation { .. } | GraphicKind::DroneLocation { .. } => {
            Layer::LiveLocations
        }
    }
}

/// Berechnet die vollständige Zeichenreihenfolge.
///
/// Grundlayout: Linien, POI-Linien, POI-Visuals, Wegpunkt-Visuals,
/// Positions-Anzeigen — innerhalb jeder Ebene stabil in Einfüge-Reihenfolge.
/// Eine Selektion wandert ans Ende; darüber kommen art-spezifische Raises:
/// bei einer selektierten Linie die beiden End-Marker und der Einfüge-Marker,
/// bei einem Wegpunkt-Marker sein Pfeil, bei einem POI-Marker alle darauf
/// zielenden Pfeile.
pub fn compute_draw_order(
    graphics: &IndexMap<GraphicId, Graphic>,
    selection: Option<GraphicId>,
) -> Vec<GraphicId> {
    let mut order: Vec<GraphicId> = Vec::with_capacity(graphics.len());

    // Stabile Partition in die fünf Ebenen
    for target in [
        Layer::WayPointLines,
        Layer::PoiLines,
        Layer::PoiVisuals,
        Layer::WayPointVisuals,
        Layer::LiveLocations,
    ] {
        order.extend(
            graphics
                .values()
                .filter(|g| layer(&g.kind) == target)
                .map(|g| g.id),
        );
    }

    let Some(selected_id) = selection else {
        return order;
    };
    let Some(selected) = graphics.get(&selected_id) else {
        return order;
    };

    raise_to_top(&mut order, selected_id);

    match &selected.kind {
        GraphicKind::WayPointLine { origin, .. } => {
            // End-Marker und Einfüge-Marker über die Linie heben
            raise_matching(&mut order, graphics, |kind| {
                matches!(kind, GraphicKind::WayPointMarker { index, .. } if *index == *origin)
            });
            raise_matching(&mut order, graphics, |kind| {
                matches!(kind, GraphicKind::WayPointMarker { index, .. } if *index == origin + 1)
            });
            raise_matching(&mut order, graphics, |kind| {
                matches!(kind, GraphicKind::InsertMarker { origin: o, .. } if *o == *origin)
            });
        }
        GraphicKind::WayPointMarker { index, .. } => {
            raise_matching(&mut order, graphics, |kind| {
                matches!(kind, GraphicKind::WayPointArrow { index: i, .. } if *i == *index)
            });
        }
        GraphicKind::PoiMarker { index, .. } => {
            raise_matching(&mut order, graphics, |kind| {
                matches!(kind, GraphicKind::WayPointArrow { poi_index, .. } if *poi_index == Some(*index))
            });
        }
        _ => {}
    }

    order
}

/// Verschiebt eine Grafik ans Ende der Reihenfolge.
fn raise_to_top(order: &mut Vec<GraphicId>, id: GraphicId) {
    if let Some(position) = order.iter().position(|&existing| existing == id) {
        order.remove(position);
        order.push(id);
    }
}

/// Hebt alle Grafiken an, auf die das Prädikat passt (stabile Reihenfolge).
fn raise_matching<F>(
    order: &mut Vec<GraphicId>,
    graphics: &IndexMap<GraphicId, Graphic>,
    predicate: F,
) where
    F: Fn(&GraphicKind) -> bool,
{
    let matching: Vec<GraphicId> = order
        .iter()
        .copied()
        .filter(|id| graphics.get(id).is_some_and(|g| predicate(&g.kind)))
        .collect();
    for id in matching {
        raise_to_top(order, id);
    }
}
