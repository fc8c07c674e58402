//! Das Flugplan-Overlay: hält die Grafik-Sammlung in Gleichschritt
//! mit dem Flugplan-Graphen und treibt die Selektions-Semantik.
//!
//! Jeder strukturelle Edit (Einfügen, Entfernen, Relation setzen) wird in
//! derselben Transaktion in die Grafiken gespiegelt — die beiden Sammlungen
//! laufen nie beobachtbar auseinander. Nach jeder strukturellen oder
//! Selektions-Änderung wird die Zeichenreihenfolge neu angewandt.

use super::draw_order::compute_draw_order;
use super::graphic::{Graphic, GraphicId, GraphicKind};
use super::surface::MapSurface;
use crate::core::{geo, FlightPlan, GeoPoint, PoiPoint, Waypoint};
use crate::shared::EditorOptions;
use indexmap::IndexMap;

/// Ticket für das einmalige, verzögerte Neu-Anwenden der Zeichenreihenfolge.
///
/// Die Render-Oberfläche übernimmt eine Umsortierung im selben Frame nicht
/// immer zuverlässig; deshalb wird dieselbe Reihenfolge nach kurzer
/// Verzögerung ein zweites Mal angewandt. Das Ticket trägt die Generation
/// der Reihenfolge, für die es ausgestellt wurde — hat inzwischen eine
/// neuere Umsortierung stattgefunden, verfällt es wirkungslos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredReorder {
    generation: u64,
}

/// Synchronisierte Grafik-Spiegelung eines [`FlightPlan`].
pub struct FlightPlanOverlay {
    plan: FlightPlan,
    graphics: IndexMap<GraphicId, Graphic>,
    selection: Option<GraphicId>,
    next_id: u64,
    order_generation: u64,
    options: EditorOptions,
}

impl FlightPlanOverlay {
    /// Baut das Overlay für einen (bereits mit Relationen versehenen) Plan auf.
    pub fn new(plan: FlightPlan, options: EditorOptions) -> Self {
        let mut overlay = Self {
            plan,
            graphics: IndexMap::new(),
            selection: None,
            next_id: 0,
            order_generation: 0,
            options,
        };
        overlay.build_graphics();
        overlay
    }

    /// Überträgt den kompletten Grafik-Bestand auf eine frische Oberfläche.
    pub fn populate(&mut self, surface: &mut dyn MapSurface) {
        for graphic in self.graphics.values() {
            surface.add_graphic(graphic);
        }
        self.reorder(surface);
    }

    // ── Zugriff ─────────────────────────────────────────────────────

    pub fn plan(&self) -> &FlightPlan {
        &self.plan
    }

    pub fn graphics(&self) -> &IndexMap<GraphicId, Graphic> {
        &self.graphics
    }

    pub fn selection(&self) -> Option<GraphicId> {
        self.selection
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    // ── Wegpunkt-Edits ──────────────────────────────────────────────

    /// Hängt einen neuen Wegpunkt ans Ende des Plans an.
    pub fn add_way_point(
        &mut self,
        coordinate: GeoPoint,
        altitude: f64,
        surface: &mut dyn MapSurface,
    ) -> usize {
        let way_point = Waypoint::new(
            coordinate,
            altitude,
            self.options.default_way_point_speed,
            self.plan.should_continue,
        );
        let index = self.plan.add_way_point(way_point);
        log::debug!("Wegpunkt {} angehängt", index);

        self.add_way_point_graphics(index, surface);
        if index > 0 {
            self.add_line_graphic(index - 1, surface);
            self.refresh_way_point(index - 1, surface);
        }
        self.reorder(surface);
        index
    }

    /// Fügt einen Wegpunkt strikt zwischen zwei bestehenden ein.
    ///
    /// Alle Wegpunkt-Referenzen bestehender Grafiken ab der Einfüge-Position
    /// rücken nach oben; die alte Verbindungslinie der beiden Nachbarn wird
    /// durch zwei neue ersetzt.
    pub fn insert_way_point(
        &mut self,
        coordinate: GeoPoint,
        altitude: f64,
        index: usize,
        surface: &mut dyn MapSurface,
    ) -> Option<usize> {
        let index = self.plan.insert_way_point(coordinate, altitude, index)?;
        log::debug!("Wegpunkt bei {} eingefügt", index);

        self.clear_selection(surface);
        for graphic in self.graphics.values_mut() {
            graphic.kind.shift_way_point_indices(index, 1);
            surface.update_graphic(graphic);
        }

        // Alte Nachbar-Linie raus, zwei neue Teilstücke rein
        if let Some(id) = self.find_line(index - 1) {
            self.remove_graphic(id, surface);
        }
        self.add_way_point_graphics(index, surface);
        self.add_line_graphic(index - 1, surface);
        self.add_line_graphic(index, surface);

        // Nummern-Labels und Yaws ab der Einfüge-Stelle auffrischen
        for i in (index - 1)..self.plan.way_point_count() {
            self.refresh_way_point(i, surface);
        }

        self.reorder(surface);
        Some(index)
    }

    /// Entfernt einen Wegpunkt und überbrückt die Lücke.
    pub fn remove_way_point(
        &mut self,
        index: usize,
        surface: &mut dyn MapSurface,
    ) -> Option<Waypoint> {
        let removed = self.plan.remove_way_point(index)?;
        log::debug!("Wegpunkt {} entfernt", index);

        self.clear_selection(surface);

        // Grafiken des Wegpunkts und die beiden angrenzenden Linien entfernen
        let doomed: Vec<GraphicId> = self
            .graphics
            .values()
            .filter(|g| match &g.kind {
                GraphicKind::WayPointMarker { index: i, .. }
                | GraphicKind::WayPointLabel { index: i, .. }
                | GraphicKind::WayPointArrow { index: i, .. } => *i == index,
                GraphicKind::WayPointLine { origin, .. } => {
                    *origin == index || (index > 0 && *origin == index - 1)
                }
                _ => false,
            })
            .map(|g| g.id)
            .collect();
        for id in doomed {
            self.remove_graphic(id, surface);
        }

        for graphic in self.graphics.values_mut() {
            graphic.kind.shift_way_point_indices(index, -1);
            surface.update_graphic(graphic);
        }

        // Überbrückende Linie, wenn auf beiden Seiten Nachbarn übrig sind
        if index > 0 && index < self.plan.way_point_count() {
            self.add_line_graphic(index - 1, surface);
        }

        let start = index.saturating_sub(1);
        for i in start..self.plan.way_point_count() {
            self.refresh_way_point(i, surface);
        }

        self.reorder(surface);
        Some(removed)
    }

    /// Setzt die Position eines Wegpunkts und frischt das
    /// Drei-Punkte-Fenster der abhängigen Grafiken auf.
    pub fn set_way_point_coordinate(
        &mut self,
        index: usize,
        coordinate: GeoPoint,
        surface: &mut dyn MapSurface,
    ) {
        if index >= self.plan.way_point_count() {
            return;
        }
        self.plan.set_way_point_coordinate(index, coordinate);
        let start = index.saturating_sub(1);
        let end = (index + 1).min(self.plan.way_point_count() - 1);
        for i in start..=end {
            self.refresh_way_point(i, surface);
        }
    }

    /// Setzt die Flughöhe eines Wegpunkts.
    pub fn set_way_point_altitude(
        &mut self,
        index: usize,
        altitude: f64,
        surface: &mut dyn MapSurface,
    ) {
        self.plan.set_way_point_altitude(index, altitude);
        self.refresh_way_point(index, surface);
    }

    /// Setzt einen Nutzer-Yaw (mit Snap auf den Automatik-Modus
    /// innerhalb der konfigurierten Toleranz).
    pub fn set_custom_yaw(&mut self, index: usize, yaw: f64, surface: &mut dyn MapSurface) {
        self.plan
            .set_custom_yaw_with_tolerance(index, yaw, self.options.custom_yaw_tolerance_deg);
        self.refresh_way_point(index, surface);
    }

    /// Ob der Orientierungs-Pfeil eines Wegpunkts per Touch editiert
    /// werden darf: der Pfeil muss selektiert sein und der Berührungs-Kurs
    /// innerhalb der Pfeil-Toleranz am aktuellen Yaw liegen.
    pub fn can_edit_orientation(&self, index: usize, touch_bearing: f64) -> bool {
        let Some(arrow) = self.graphics.values().find(|g| {
            matches!(&g.kind, GraphicKind::WayPointArrow { index: i, .. } if *i == index)
        }) else {
            return false;
        };
        if !arrow.selected {
            return false;
        }
        let GraphicKind::WayPointArrow { rotation, .. } = &arrow.kind else {
            return false;
        };
        geo::is_close_to(touch_bearing, *rotation, self.options.arrow_edit_tolerance_deg)
    }

    // ── POI-Edits ───────────────────────────────────────────────────

    /// Legt einen neuen POI an.
    pub fn add_poi(
        &mut self,
        coordinate: GeoPoint,
        altitude: f64,
        color: usize,
        surface: &mut dyn MapSurface,
    ) -> usize {
        let index = self.plan.add_poi(PoiPoint::new(coordinate, altitude, color));
        log::debug!("POI {} angelegt", index);
        self.add_poi_graphics(index, surface);
        self.reorder(surface);
        index
    }

    /// Entfernt einen POI mitsamt Relations-Kaskade.
    pub fn remove_poi(
        &mut self,
        index: usize,
        surface: &mut dyn MapSurface,
    ) -> Option<PoiPoint> {
        if index >= self.plan.poi_count() {
            return None;
        }
        self.clear_selection(surface);

        // Betroffene Wegpunkte vor der Kaskade festhalten
        let affected: Vec<usize> = self
            .plan
            .poi(index)
            .map(|poi| poi.way_point_indices.clone())
            .unwrap_or_default();

        let removed = self.plan.remove_poi(index)?;
        log::debug!("POI {} entfernt", index);

        let doomed: Vec<GraphicId> = self
            .graphics
            .values()
            .filter(|g| match &g.kind {
                GraphicKind::PoiMarker { index: i, .. }
                | GraphicKind::PoiLabel { index: i, .. } => *i == index,
                _ => false,
            })
            .map(|g| g.id)
            .collect();
        for id in doomed {
            self.remove_graphic(id, surface);
        }

        for graphic in self.graphics.values_mut() {
            graphic.kind.shift_poi_indices(index);
            surface.update_graphic(graphic);
        }

        // Pfeile der zuvor zielenden Wegpunkte zeigen wieder auf die Strecke
        for wp_index in affected {
            self.refresh_way_point(wp_index, surface);
        }

        self.reorder(surface);
        Some(removed)
    }

    /// Weist einem Wegpunkt einen POI zu und spiegelt die Relation
    /// in den Pfeil-Zustand.
    pub fn assign_poi(
        &mut self,
        way_point_index: usize,
        poi_index: usize,
        surface: &mut dyn MapSurface,
    ) {
        if way_point_index >= self.plan.way_point_count() || poi_index >= self.plan.poi_count() {
            return;
        }

        // Eine bestehende Relation wird ersetzt; ihre transiente Linie
        // darf die alte Relation nicht überleben
        let doomed: Vec<GraphicId> = self
            .graphics
            .values()
            .filter(|g| {
                matches!(&g.kind, GraphicKind::WayPointToPoiLine { way_point, .. }
                    if *way_point == way_point_index)
            })
            .map(|g| g.id)
            .collect();
        for id in doomed {
            self.remove_graphic(id, surface);
        }

        self.plan.assign_poi(way_point_index, poi_index);
        log::debug!("POI {} an Wegpunkt {} zugewiesen", poi_index, way_point_index);
        self.refresh_way_point(way_point_index, surface);

        // Ist genau dieser POI selektiert, erhält die neue Relation
        // sofort ihre transiente Linie
        if self.selected_poi_index() == Some(poi_index) {
            self.add_poi_line_graphic(way_point_index, poi_index, true, surface);
            if let Some(id) = self.find_arrow(way_point_index) {
                self.set_graphic_selected(id, true, surface);
            }
        }
        self.reorder(surface);
    }

    /// Löst die POI-Relation eines Wegpunkts.
    pub fn unassign_poi(&mut self, way_point_index: usize, surface: &mut dyn MapSurface) {
        self.plan.unassign_poi(way_point_index);

        let doomed: Vec<GraphicId> = self
            .graphics
            .values()
            .filter(|g| {
                matches!(&g.kind, GraphicKind::WayPointToPoiLine { way_point, .. }
                    if *way_point == way_point_index)
            })
            .map(|g| g.id)
            .collect();
        for id in doomed {
            self.remove_graphic(id, surface);
        }

        self.refresh_way_point(way_point_index, surface);
        self.reorder(surface);
    }

    /// Setzt die Position eines POI und frischt alle zielenden Pfeile auf.
    pub fn set_poi_coordinate(
        &mut self,
        index: usize,
        coordinate: GeoPoint,
        surface: &mut dyn MapSurface,
    ) {
        if index >= self.plan.poi_count() {
            return;
        }
        self.plan.set_poi_coordinate(index, coordinate);
        self.refresh_poi(index, surface);
    }

    /// Setzt die Höhe eines POI.
    pub fn set_poi_altitude(&mut self, index: usize, altitude: f64, surface: &mut dyn MapSurface) {
        self.plan.set_poi_altitude(index, altitude);
        self.refresh_poi(index, surface);
    }

    // ── Positions-Anzeigen ──────────────────────────────────────────

    /// Aktualisiert (oder entfernt) die Bediener-Positionsanzeige.
    pub fn set_user_location(
        &mut self,
        coordinate: Option<GeoPoint>,
        surface: &mut dyn MapSurface,
    ) {
        self.set_location_graphic(coordinate, true, surface);
    }

    /// Aktualisiert (oder entfernt) die Drohnen-Positionsanzeige.
    pub fn set_drone_location(
        &mut self,
        coordinate: Option<GeoPoint>,
        surface: &mut dyn MapSurface,
    ) {
        self.set_location_graphic(coordinate, false, surface);
    }

    // ── Selektion ───────────────────────────────────────────────────

    /// Setzt die Selektion um, inklusive art-spezifischer Kaskade.
    ///
    /// Die vorige Kaskade (transiente Grafiken, Selektions-Flags) wird
    /// vollständig zurückgebaut, bevor die neue angewandt wird.
    pub fn select(&mut self, id: Option<GraphicId>, surface: &mut dyn MapSurface) {
        self.clear_selection(surface);

        let Some(id) = id else {
            self.reorder(surface);
            return;
        };
        let Some(kind) = self.graphics.get(&id).map(|g| g.kind.clone()) else {
            log::warn!("Selektion auf unbekannte Grafik {:?} ignoriert", id);
            self.reorder(surface);
            return;
        };

        self.selection = Some(id);
        self.set_graphic_selected(id, true, surface);

        match kind {
            GraphicKind::WayPointMarker { index, .. } => {
                // Pfeil nur mit-selektieren, wenn der Wegpunkt keinen POI hat —
                // POI-Pfeile werden über den POI selektiert
                let has_poi = self
                    .plan
                    .way_point(index)
                    .is_some_and(|wp| wp.poi_index.is_some());
                if !has_poi {
                    if let Some(arrow_id) = self.find_arrow(index) {
                        self.set_graphic_selected(arrow_id, true, surface);
                    }
                }
            }
            GraphicKind::WayPointLine { origin, from, to } => {
                // Transienter Einfüge-Marker in Linienmitte
                let midpoint = from.midpoint(&to);
                self.insert_graphic(
                    GraphicKind::InsertMarker {
                        origin,
                        coordinate: midpoint,
                    },
                    surface,
                );

                for index in [origin, origin + 1] {
                    let has_poi = self
                        .plan
                        .way_point(index)
                        .is_some_and(|wp| wp.poi_index.is_some());
                    if !has_poi {
                        if let Some(arrow_id) = self.find_arrow(index) {
                            self.set_graphic_selected(arrow_id, true, surface);
                        }
                    }
                }
            }
            GraphicKind::PoiMarker { index, .. } => {
                let targets = self
                    .plan
                    .poi(index)
                    .map(|poi| poi.way_point_indices.clone())
                    .unwrap_or_default();
                for wp_index in targets {
                    if let Some(arrow_id) = self.find_arrow(wp_index) {
                        self.set_graphic_selected(arrow_id, true, surface);
                    }
                    self.add_poi_line_graphic(wp_index, index, true, surface);
                }
            }
            _ => {}
        }

        self.reorder(surface);
    }

    /// Baut die aktuelle Selektions-Kaskade ab (ohne Reorder).
    fn clear_selection(&mut self, surface: &mut dyn MapSurface) {
        self.selection = None;

        let transient: Vec<GraphicId> = self
            .graphics
            .values()
            .filter(|g| g.kind.is_transient())
            .map(|g| g.id)
            .collect();
        for id in transient {
            self.remove_graphic(id, surface);
        }

        let selected: Vec<GraphicId> = self
            .graphics
            .values()
            .filter(|g| g.selected)
            .map(|g| g.id)
            .collect();
        for id in selected {
            self.set_graphic_selected(id, false, surface);
        }
    }

    // ── Zeichenreihenfolge ──────────────────────────────────────────

    /// Wendet die frisch berechnete Zeichenreihenfolge an und erhöht die
    /// Generation. Der Host sollte anschließend [`reorder_ticket`] mit der
    /// konfigurierten Verzögerung wieder einlösen.
    ///
    /// [`reorder_ticket`]: FlightPlanOverlay::reorder_ticket
    fn reorder(&mut self, surface: &mut dyn MapSurface) {
        let order = compute_draw_order(&self.graphics, self.selection);
        surface.apply_draw_order(&order);
        self.order_generation += 1;
    }

    /// Ticket für das verzögerte Neu-Anwenden der aktuellen Reihenfolge.
    pub fn reorder_ticket(&self) -> DeferredReorder {
        DeferredReorder {
            generation: self.order_generation,
        }
    }

    /// Löst ein Reorder-Ticket ein.
    ///
    /// Wurde seit Ausstellung des Tickets bereits eine neuere Reihenfolge
    /// angewandt, verfällt es als No-op.
    pub fn fire_deferred(&self, ticket: DeferredReorder, surface: &mut dyn MapSurface) {
        if ticket.generation != self.order_generation {
            log::debug!(
                "Verzögertes Reorder verfallen (Generation {} < {})",
                ticket.generation,
                self.order_generation
            );
            return;
        }
        let order = compute_draw_order(&self.graphics, self.selection);
        surface.apply_draw_order(&order);
    }

    // ── Aufbau & Auffrischen ────────────────────────────────────────

    /// Erzeugt den Grafik-Bestand für den aktuellen Plan-Zustand.
    fn build_graphics(&mut self) {
        for index in 0..self.plan.way_point_count() {
            self.push_way_point_graphics(index);
        }
        for origin in 0..self.plan.way_point_count().saturating_sub(1) {
            self.push_line_graphic(origin);
        }
        for index in 0..self.plan.poi_count() {
            self.push_poi_graphics(index);
        }
    }

    fn alloc_id(&mut self) -> GraphicId {
        let id = GraphicId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert_graphic(&mut self, kind: GraphicKind, surface: &mut dyn MapSurface) -> GraphicId {
        let id = self.alloc_id();
        let graphic = Graphic::new(id, kind);
        surface.add_graphic(&graphic);
        self.graphics.insert(id, graphic);
        id
    }

    fn push_graphic(&mut self, kind: GraphicKind) -> GraphicId {
        let id = self.alloc_id();
        self.graphics.insert(id, Graphic::new(id, kind));
        id
    }

    fn remove_graphic(&mut self, id: GraphicId, surface: &mut dyn MapSurface) {
        if self.graphics.shift_remove(&id).is_some() {
            surface.remove_graphic(id);
        }
        if self.selection == Some(id) {
            self.selection = None;
        }
    }

    fn set_graphic_selected(&mut self, id: GraphicId, selected: bool, surface: &mut dyn MapSurface) {
        if let Some(graphic) = self.graphics.get_mut(&id) {
            graphic.selected = selected;
            surface.update_graphic(graphic);
        }
    }

    fn way_point_kinds(&self, index: usize) -> Option<[GraphicKind; 3]> {
        let wp = self.plan.way_point(index)?;
        let rotation = wp.yaw.unwrap_or_else(|| self.plan.computed_yaw(index));
        Some([
            GraphicKind::WayPointMarker {
                index,
                coordinate: wp.coordinate(),
                altitude: wp.altitude,
            },
            GraphicKind::WayPointLabel {
                index,
                coordinate: wp.coordinate(),
                text: format!("{}", index + 1),
            },
            GraphicKind::WayPointArrow {
                index,
                poi_index: wp.poi_index,
                coordinate: wp.coordinate(),
                rotation,
            },
        ])
    }

    fn push_way_point_graphics(&mut self, index: usize) {
        if let Some(kinds) = self.way_point_kinds(index) {
            for kind in kinds {
                self.push_graphic(kind);
            }
        }
    }

    fn add_way_point_graphics(&mut self, index: usize, surface: &mut dyn MapSurface) {
        if let Some(kinds) = self.way_point_kinds(index) {
            for kind in kinds {
                self.insert_graphic(kind, surface);
            }
        }
    }

    fn line_kind(&self, origin: usize) -> Option<GraphicKind> {
        let from = self.plan.way_point(origin)?;
        let to = self.plan.way_point(origin + 1)?;
        Some(GraphicKind::WayPointLine {
            origin,
            from: from.coordinate(),
            to: to.coordinate(),
        })
    }

    fn push_line_graphic(&mut self, origin: usize) {
        if let Some(kind) = self.line_kind(origin) {
            self.push_graphic(kind);
        }
    }

    fn add_line_graphic(&mut self, origin: usize, surface: &mut dyn MapSurface) {
        if let Some(kind) = self.line_kind(origin) {
            self.insert_graphic(kind, surface);
        }
    }

    fn poi_kinds(&self, index: usize) -> Option<[GraphicKind; 2]> {
        let poi = self.plan.poi(index)?;
        Some([
            GraphicKind::PoiMarker {
                index,
                coordinate: poi.coordinate(),
                color: poi.color,
            },
            GraphicKind::PoiLabel {
                index,
                coordinate: poi.coordinate(),
                text: format!("{:.0} m", poi.altitude),
            },
        ])
    }

    fn push_poi_graphics(&mut self, index: usize) {
        if let Some(kinds) = self.poi_kinds(index) {
            for kind in kinds {
                self.push_graphic(kind);
            }
        }
    }

    fn add_poi_graphics(&mut self, index: usize, surface: &mut dyn MapSurface) {
        if let Some(kinds) = self.poi_kinds(index) {
            for kind in kinds {
                self.insert_graphic(kind, surface);
            }
        }
    }

    fn add_poi_line_graphic(
        &mut self,
        way_point_index: usize,
        poi_index: usize,
        selected: bool,
        surface: &mut dyn MapSurface,
    ) {
        let (Some(wp), Some(poi)) = (
            self.plan.way_point(way_point_index),
            self.plan.poi(poi_index),
        ) else {
            return;
        };
        let kind = GraphicKind::WayPointToPoiLine {
            way_point: way_point_index,
            poi: poi_index,
            from: wp.coordinate(),
            to: poi.coordinate(),
        };
        let id = self.insert_graphic(kind, surface);
        if selected {
            self.set_graphic_selected(id, true, surface);
        }
    }

    /// Frischt alle Grafiken eines Wegpunkts aus dem Plan-Zustand auf:
    /// Marker, Label, Pfeil sowie die angrenzenden Linien und POI-Linien.
    fn refresh_way_point(&mut self, index: usize, surface: &mut dyn MapSurface) {
        let Some(kinds) = self.way_point_kinds(index) else {
            return;
        };
        for fresh in kinds {
            let target = self.graphics.values_mut().find(|g| match (&g.kind, &fresh) {
                (
                    GraphicKind::WayPointMarker { index: a, .. },
                    GraphicKind::WayPointMarker { index: b, .. },
                )
                | (
                    GraphicKind::WayPointLabel { index: a, .. },
                    GraphicKind::WayPointLabel { index: b, .. },
                )
                | (
                    GraphicKind::WayPointArrow { index: a, .. },
                    GraphicKind::WayPointArrow { index: b, .. },
                ) => a == b,
                _ => false,
            });
            if let Some(graphic) = target {
                graphic.kind = fresh;
                surface.update_graphic(graphic);
            }
        }

        if index > 0 {
            self.refresh_line(index - 1, surface);
        }
        self.refresh_line(index, surface);
        self.refresh_poi_lines_of_way_point(index, surface);
    }

    /// Frischt eine Strecken-Linie samt eventuellem Einfüge-Marker auf.
    fn refresh_line(&mut self, origin: usize, surface: &mut dyn MapSurface) {
        let Some(fresh) = self.line_kind(origin) else {
            return;
        };
        let GraphicKind::WayPointLine { from, to, .. } = &fresh else {
            return;
        };
        let midpoint = from.midpoint(to);

        for graphic in self.graphics.values_mut() {
            let changed = match &mut graphic.kind {
                GraphicKind::WayPointLine {
                    origin: o,
                    from: f,
                    to: t,
                } if *o == origin => {
                    *f = *from;
                    *t = *to;
                    true
                }
                GraphicKind::InsertMarker {
                    origin: o,
                    coordinate,
                } if *o == origin => {
                    *coordinate = midpoint;
                    true
                }
                _ => false,
            };
            if changed {
                surface.update_graphic(graphic);
            }
        }
    }

    /// Frischt die transienten POI-Linien auf, die von einem Wegpunkt ausgehen.
    fn refresh_poi_lines_of_way_point(&mut self, index: usize, surface: &mut dyn MapSurface) {
        let Some(wp) = self.plan.way_point(index) else {
            return;
        };
        let from_coordinate = wp.coordinate();
        let poi_coordinate = wp
            .poi_index
            .and_then(|i| self.plan.poi(i))
            .map(|poi| poi.coordinate());

        for graphic in self.graphics.values_mut() {
            let changed = match &mut graphic.kind {
                GraphicKind::WayPointToPoiLine {
                    way_point, from, to, ..
                } if *way_point == index => {
                    *from = from_coordinate;
                    if let Some(coordinate) = poi_coordinate {
                        *to = coordinate;
                    }
                    true
                }
                _ => false,
            };
            if changed {
                surface.update_graphic(graphic);
            }
        }
    }

    /// Frischt alle Grafiken eines POI auf, inklusive der zielenden Pfeile.
    fn refresh_poi(&mut self, index: usize, surface: &mut dyn MapSurface) {
        let Some(kinds) = self.poi_kinds(index) else {
            return;
        };
        for fresh in kinds {
            let target = self.graphics.values_mut().find(|g| match (&g.kind, &fresh) {
                (
                    GraphicKind::PoiMarker { index: a, .. },
                    GraphicKind::PoiMarker { index: b, .. },
                )
                | (
                    GraphicKind::PoiLabel { index: a, .. },
                    GraphicKind::PoiLabel { index: b, .. },
                ) => a == b,
                _ => false,
            });
            if let Some(graphic) = target {
                graphic.kind = fresh;
                surface.update_graphic(graphic);
            }
        }

        let targets = self
            .plan
            .poi(index)
            .map(|poi| poi.way_point_indices.clone())
            .unwrap_or_default();
        for wp_index in targets {
            self.refresh_way_point(wp_index, surface);
        }
    }

    // ── Helfer ──────────────────────────────────────────────────────

    fn find_arrow(&self, index: usize) -> Option<GraphicId> {
        self.graphics
            .values()
            .find(|g| matches!(&g.kind, GraphicKind::WayPointArrow { index: i, .. } if *i == index))
            .map(|g| g.id)
    }

    fn find_line(&self, origin: usize) -> Option<GraphicId> {
        self.graphics
            .values()
            .find(|g| matches!(&g.kind, GraphicKind::WayPointLine { origin: o, .. } if *o == origin))
            .map(|g| g.id)
    }

    /// POI-Index der aktuellen Selektion, falls ein POI-Marker selektiert ist.
    fn selected_poi_index(&self) -> Option<usize> {
        let id = self.selection?;
        match &self.graphics.get(&id)?.kind {
            GraphicKind::PoiMarker { index, .. } => Some(*index),
            _ => None,
        }
    }

    fn set_location_graphic(
        &mut self,
        coordinate: Option<GeoPoint>,
        user: bool,
        surface: &mut dyn MapSurface,
    ) {
        let existing = self
            .graphics
            .values()
            .find(|g| match &g.kind {
                GraphicKind::UserLocation { .. } => user,
                GraphicKind::DroneLocation { .. } => !user,
                _ => false,
            })
            .map(|g| g.id);

        match (coordinate, existing) {
            (Some(coordinate), Some(id)) => {
                if let Some(graphic) = self.graphics.get_mut(&id) {
                    match &mut graphic.kind {
                        GraphicKind::UserLocation { coordinate: c }
                        | GraphicKind::DroneLocation { coordinate: c } => *c = coordinate,
                        _ => {}
                    }
                    surface.update_graphic(graphic);
                }
            }
            (Some(coordinate), None) => {
                let kind = if user {
                    GraphicKind::UserLocation { coordinate }
                } else {
                    GraphicKind::DroneLocation { coordinate }
                };
                self.insert_graphic(kind, surface);
                self.reorder(surface);
            }
            (None, Some(id)) => {
                self.remove_graphic(id, surface);
                self.reorder(surface);
            }
            (None, None) => {}
        }
    }
}
