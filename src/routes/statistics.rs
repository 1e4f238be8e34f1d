use crate::{
    error::RosterResult,
    maud_conveniences::{subtitle, title},
    state::RosterState,
};
use axum::extract::State;
use maud::{Markup, html};

/// Count and distribution are fetched concurrently but rendered as one
/// unit: if either fails, the whole partial fails, the error lands in
/// the section's slot, and whatever numbers were on screen stay there.
pub async fn internal_get_statistics(State(state): State<RosterState>) -> RosterResult<Markup> {
    let (total, mut by_year) = tokio::try_join!(
        state.api().student_count(),
        state.api().students_by_year()
    )?;
    by_year.sort_by_key(|entry| entry.year);

    let max_count = by_year.iter().map(|entry| entry.count).max().unwrap_or(0);

    Ok(html! {
        div id="statistics_error" {}
        div class="space-y-4" {
            div class="bg-gray-800 rounded shadow-md p-4" {
                (title("Total Students"))
                (subtitle("Overall student count"))
                p class="text-4xl font-bold text-blue-400" {(total)}
            }
            @if !by_year.is_empty() {
                div class="bg-gray-800 rounded shadow-md p-4" {
                    (title("Students by Birth Year"))
                    (subtitle("Distribution of students across birth years"))
                    div class="flex flex-col space-y-2" {
                        @for entry in &by_year {
                            div class="flex items-center space-x-2" {
                                span class="w-12 text-right text-gray-300" {(entry.year)}
                                div class="flex-1 bg-gray-700 rounded" {
                                    div class="bg-blue-500 rounded py-1 text-xs text-right pr-2 text-white" style={"width: " (bar_width(entry.count, max_count)) "%"} {
                                        (entry.count)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

const fn bar_width(count: u64, max: u64) -> u64 {
    if max == 0 { 0 } else { count * 100 / max }
}

#[cfg(test)]
mod tests {
    use super::bar_width;

    #[test]
    fn bar_width_scales_against_the_tallest_bar() {
        assert_eq!(bar_width(5, 10), 50);
        assert_eq!(bar_width(10, 10), 100);
        assert_eq!(bar_width(0, 10), 0);
    }

    #[test]
    fn bar_width_handles_all_zero_distribution() {
        assert_eq!(bar_width(0, 0), 0);
    }
}
