//! Plain-text rendering for catalog output.
//!
//! # Responsibility
//! - Render movie records as an aligned table for list/find output.
//! - Keep absent optional fields visually distinct from real values.

use movielog_core::Movie;

const HEADERS: [&str; 7] = [
    "ID", "TITLE", "DIRECTOR", "YEAR", "GENRE", "RATING", "WATCHED",
];
const ABSENT: &str = "-";

/// Renders records as an aligned table, one row per movie.
pub fn movie_table(movies: &[Movie]) -> String {
    let rows: Vec<[String; 7]> = movies.iter().map(movie_row).collect();

    let mut widths: [usize; 7] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn movie_row(movie: &Movie) -> [String; 7] {
    [
        movie.id.to_string(),
        movie.title.clone(),
        movie.director.clone(),
        movie.release_year.to_string(),
        movie.genre.clone().unwrap_or_else(|| ABSENT.to_string()),
        movie
            .rating
            .map(|rating| format!("{rating:.1}"))
            .unwrap_or_else(|| ABSENT.to_string()),
        movie
            .watched_date
            .clone()
            .unwrap_or_else(|| ABSENT.to_string()),
    ]
}

fn push_row(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    for (index, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if index > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        // Last column needs no trailing padding.
        if index < cells.len() - 1 {
            for _ in cell.chars().count()..*width {
                out.push(' ');
            }
        }
    }
    out.push('\n');
}
