//! User-facing text in the gallery's language (Spanish).

use chrono::{DateTime, Local, NaiveDate};

use crate::state::Filter;

/// Shown in the grid when nothing matches
pub const NO_CONTENT: &str = "No hay contenido aún.";
/// Shown in the grid when the manifest can't be loaded
pub const LOAD_FAILED: &str = "No se pudo cargar la galería.";
pub const LOADING: &str = "Cargando…";
pub const SEARCH_PLACEHOLDER: &str = "Buscar…";
pub const VIEW: &str = "Ver";
pub const OPEN: &str = "Abrir";
pub const PLAY: &str = "Reproducir";
pub const CLOSE: &str = "Cerrar";
pub const PREVIOUS: &str = "Anterior";
pub const NEXT: &str = "Siguiente";
pub const COPY_LINK: &str = "Copiar enlace";
pub const NO_PREVIEW: &str = "Sin vista previa";
pub const ALL: &str = "Todo";

/// Known category tokens, in the order the filter pills show them
pub const CATEGORIES: [&str; 3] = ["bodas", "pre-bodas", "sesiones-fotograficas"];

/// Display name for a category token. Unknown tokens pass through.
pub fn category_label(category: &str) -> &str {
    match category {
        "sesiones-fotograficas" => "Sesiones fotográficas",
        "pre-bodas" => "Pre bodas",
        "bodas" => "Bodas",
        other => other,
    }
}

pub fn filter_label(filter: &Filter) -> &str {
    match filter {
        Filter::All => ALL,
        Filter::Category(category) => category_label(category),
    }
}

/// Short local date (d/m/yyyy) for an item timestamp.
///
/// RFC 3339 timestamps are shown in the viewer's local time zone. Plain
/// `YYYY-MM-DD` dates are shown as written; anything else is returned unchanged.
pub fn short_date(timestamp: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.with_timezone(&Local).format("%-d/%-m/%Y").to_string();
    }

    if let Ok(date) = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d") {
        return date.format("%-d/%-m/%Y").to_string();
    }

    timestamp.to_string()
}
