//! Visuelle Entitäten der Karten-Darstellung.

use crate::core::GeoPoint;

/// Eindeutige, stabile Kennung einer Grafik im Overlay.
///
/// Anders als Wegpunkt-/POI-Indizes verschiebt sich eine `GraphicId`
/// bei strukturellen Edits nie — sie wird fortlaufend vergeben.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphicId(pub(crate) u64);

impl GraphicId {
    /// Roh-Wert der Kennung (für Logging und Sortierung).
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Geschlossene Aufzählung aller Grafik-Arten samt abgeleiteter Visuals.
///
/// Jede Variante trägt den Domänen-Index, auf den sie zeigt, plus die
/// daraus abgeleitete Darstellung (Position, Rotation, Text). Erschöpfendes
/// Matching stellt sicher, dass neue Arten nirgends vergessen werden.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicKind {
    /// Kreissymbol eines Wegpunkts
    WayPointMarker {
        index: usize,
        coordinate: GeoPoint,
        altitude: f64,
    },
    /// Nummern-Label eines Wegpunkts
    WayPointLabel {
        index: usize,
        coordinate: GeoPoint,
        text: String,
    },
    /// Orientierungs-Pfeil eines Wegpunkts (Yaw-Darstellung)
    WayPointArrow {
        index: usize,
        /// Gesetzte POI-Relation des Wegpunkts (färbt den Pfeil)
        poi_index: Option<usize>,
        coordinate: GeoPoint,
        /// Pfeil-Rotation in Grad [0, 360)
        rotation: f64,
    },
    /// Rautensymbol eines POI
    PoiMarker {
        index: usize,
        coordinate: GeoPoint,
        color: usize,
    },
    /// Höhen-Label eines POI
    PoiLabel {
        index: usize,
        coordinate: GeoPoint,
        text: String,
    },
    /// Strecken-Linie vom Wegpunkt `origin` zum Wegpunkt `origin + 1`
    WayPointLine {
        origin: usize,
        from: GeoPoint,
        to: GeoPoint,
    },
    /// Transiente Linie von einem Wegpunkt zu seinem POI
    WayPointToPoiLine {
        way_point: usize,
        poi: usize,
        from: GeoPoint,
        to: GeoPoint,
    },
    /// Transienter "hier einfügen"-Marker in der Mitte einer Linie
    InsertMarker { origin: usize, coordinate: GeoPoint },
    /// Positions-Anzeige des Bedieners
    UserLocation { coordinate: GeoPoint },
    /// Positions-Anzeige der Drohne
    DroneLocation { coordinate: GeoPoint },
}

impl GraphicKind {
    /// Wegpunkt-Index, auf den diese Grafik primär zeigt.
    ///
    /// Linien melden ihren Ursprungs-Wegpunkt; reine POI- und
    /// Positions-Grafiken liefern None.
    pub fn way_point_index(&self) -> Option<usize> {
        match self {
            GraphicKind::WayPointMarker { index, .. }
            | GraphicKind::WayPointLabel { index, .. }
            | GraphicKind::WayPointArrow { index, .. } => Some(*index),
            GraphicKind::WayPointLine { origin, .. }
            | GraphicKind::InsertMarker { origin, .. } => Some(*origin),
            GraphicKind::WayPointToPoiLine { way_point, .. } => Some(*way_point),
            GraphicKind::PoiMarker { .. }
            | GraphicKind::PoiLabel { .. }
            | GraphicKind::UserLocation { .. }
            | GraphicKind::DroneLocation { .. } => None,
        }
    }

    /// POI-Index, auf den diese Grafik zeigt (falls vorhanden).
    pub fn poi_index(&self) -> Option<usize> {
        match self {
            GraphicKind::PoiMarker { index, .. } | GraphicKind::PoiLabel { index, .. } => {
                Some(*index)
            }
            GraphicKind::WayPointToPoiLine { poi, .. } => Some(*poi),
            GraphicKind::WayPointArrow { poi_index, .. } => *poi_index,
            _ => None,
        }
    }

    /// Verschiebt alle Wegpunkt-Referenzen nach einem strukturellen Edit.
    ///
    /// Beim Einfügen (`delta = 1`) rücken Referenzen `>= from_index` nach
    /// oben, beim Entfernen (`delta = -1`) Referenzen `> from_index` nach
    /// unten. POI-seitige Indizes bleiben unberührt.
    pub fn shift_way_point_indices(&mut self, from_index: usize, delta: isize) {
        let shift = |value: &mut usize| {
            let affected = if delta > 0 {
                *value >= from_index
            } else {
                *value > from_index
            };
            if affected {
                *value = value.wrapping_add_signed(delta);
            }
        };

        match self {
            GraphicKind::WayPointMarker { index, .. }
            | GraphicKind::WayPointLabel { index, .. }
            | GraphicKind::WayPointArrow { index, .. } => shift(index),
            GraphicKind::WayPointLine { origin, .. }
            | GraphicKind::InsertMarker { origin, .. } => shift(origin),
            GraphicKind::WayPointToPoiLine { way_point, .. } => shift(way_point),
            GraphicKind::PoiMarker { .. }
            | GraphicKind::PoiLabel { .. }
            | GraphicKind::UserLocation { .. }
            | GraphicKind::DroneLocation { .. } => {}
        }
    }

    /// Zieht alle POI-Referenzen nach dem Entfernen eines POI nach unten.
    ///
    /// Referenzen `> removed_index` werden dekrementiert; ein Pfeil, der
    /// exakt auf den entfernten POI zeigte, verliert seine Referenz (die
    /// Relation ist im Plan bereits gelöst).
    pub fn shift_poi_indices(&mut self, removed_index: usize) {
        match self {
            GraphicKind::PoiMarker { index, .. } | GraphicKind::PoiLabel { index, .. } => {
                if *index > removed_index {
                    *index -= 1;
                }
            }
            GraphicKind::WayPointToPoiLine { poi, .. } => {
                if *poi > removed_index {
                    *poi -= 1;
                }
            }
            GraphicKind::WayPointArrow { poi_index, .. } => match *poi_index {
                Some(p) if p == removed_index => *poi_index = None,
                Some(p) if p > removed_index => *poi_index = Some(p - 1),
                _ => {}
            },
            _ => {}
        }
    }

    /// Ob die Grafik transient ist (nur während einer Selektion existiert).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GraphicKind::InsertMarker { .. } | GraphicKind::WayPointToPoiLine { .. }
        )
    }
}

/// Eine Grafik im Overlay: Kennung, Art und Selektions-Zustand.
#[derive(Debug, Clone, PartialEq)]
pub struct Graphic {
    pub id: GraphicId,
    pub kind: GraphicKind,
    pub selected: bool,
}

impl Graphic {
    pub fn new(id: GraphicId, kind: GraphicKind) -> Self {
        Self {
            id,
            kind,
            selected: false,
        }
    }
}
