//! Trending searches strip

use marquee_search::TrendingEntry;

use super::escape_html;

/// Renders the ranked trending list; nothing at all when it is empty.
pub fn trending_section(entries: &[TrendingEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let items: String = entries
        .iter()
        .map(|entry| {
            format!(
                r#"<li class="flex items-center min-w-[200px]" data-rank="{rank}">
                    <p class="text-7xl font-bold text-gradient mr-2">{rank}</p>
                    <img src="{poster}" alt="{term}" class="w-[127px] h-[163px] rounded-lg object-cover -ml-3.5" />
                </li>"#,
                rank = entry.rank,
                poster = escape_html(&entry.poster_url),
                term = escape_html(&entry.search_term),
            )
        })
        .collect();

    format!(
        r#"<section id="trending" class="mb-12">
            <h2 class="text-2xl font-bold mb-4">Trending Movies</h2>
            <ul class="flex flex-row overflow-x-auto gap-5 w-full">{items}</ul>
        </section>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rank: usize, term: &str) -> TrendingEntry {
        TrendingEntry {
            rank,
            search_term: term.to_string(),
            count: 10 - rank as u64,
            poster_url: format!("https://image.tmdb.org/t/p/w500/{term}.jpg"),
            movie_id: rank as u64,
        }
    }

    #[test]
    fn test_five_entries_ranked_in_order() {
        let entries: Vec<TrendingEntry> = ["dune", "batman", "jaws", "heat", "alien"]
            .iter()
            .enumerate()
            .map(|(i, term)| entry(i + 1, term))
            .collect();

        let html = trending_section(&entries);

        assert_eq!(html.matches("<li").count(), 5);
        let positions: Vec<usize> = (1..=5)
            .map(|rank| html.find(&format!(r#"data-rank="{rank}""#)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(html.find("dune.jpg").unwrap() < html.find("alien.jpg").unwrap());
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        assert_eq!(trending_section(&[]), "");
    }
}
