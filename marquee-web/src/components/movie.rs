//! Movie components - cards, grid, loading and error states

use marquee_search::Movie;

use super::escape_html;

/// Renders one movie card.
pub fn movie_card(movie: &Movie, image_base_url: &str) -> String {
    let title = escape_html(&movie.title);

    let poster_html = match movie.poster_url(image_base_url) {
        Some(url) => format!(
            r#"<img src="{}" alt="{title}" class="rounded-lg w-full h-auto" loading="lazy" />"#,
            escape_html(&url)
        ),
        None => r#"<div class="rounded-lg w-full aspect-[2/3] bg-gray-800 flex items-center justify-center text-gray-500 text-sm">No poster</div>"#.to_string(),
    };

    let mut details = Vec::new();
    if let Some(rating) = movie.vote_average.filter(|r| *r > 0.0) {
        details.push(format!(r#"<span class="text-white font-bold">&#9733; {rating:.1}</span>"#));
    }
    if let Some(language) = movie.original_language.as_deref() {
        details.push(format!(
            r#"<span class="uppercase">{}</span>"#,
            escape_html(language)
        ));
    }
    if let Some(year) = movie.release_year() {
        details.push(format!("<span>{year}</span>"));
    }
    let details_html = details.join(r#"<span aria-hidden="true">&middot;</span>"#);

    format!(
        r#"<li class="bg-gray-800/60 p-4 rounded-2xl" data-movie-id="{}">
            {poster_html}
            <p class="mt-4 text-white font-bold line-clamp-1">{title}</p>
            <div class="mt-2 flex items-center gap-2 text-sm text-gray-400">{details_html}</div>
        </li>"#,
        movie.id
    )
}

/// Renders the movie list; an empty list renders an empty grid.
pub fn movie_grid(movies: &[Movie], image_base_url: &str) -> String {
    let cards: String = movies
        .iter()
        .map(|movie| movie_card(movie, image_base_url))
        .collect();

    format!(r#"<ul class="grid grid-cols-1 gap-5 xs:grid-cols-2 md:grid-cols-3 lg:grid-cols-4">{cards}</ul>"#)
}

/// Renders a fetch error in place of the movie list.
pub fn error_message(message: &str) -> String {
    format!(
        r#"<p class="text-red-500" role="alert">{}</p>"#,
        escape_html(message)
    )
}

/// Loading indicator shown while htmx has a request in flight.
pub fn spinner(id: &str) -> String {
    format!(
        r#"<div id="{id}" class="htmx-indicator justify-center py-6" role="status">
            <div class="w-10 h-10 border-4 border-gray-700 border-t-marquee-500 rounded-full animate-spin"></div>
            <span class="sr-only">Loading...</span>
        </div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn batman() -> Movie {
        Movie {
            id: 1,
            title: "Batman".to_string(),
            poster_path: Some("/a.jpg".to_string()),
            release_date: Some("1989-06-23".to_string()),
            vote_average: Some(7.2),
            original_language: Some("en".to_string()),
        }
    }

    #[test]
    fn test_card_shows_title_poster_and_details() {
        let html = movie_card(&batman(), IMAGE_BASE);

        assert!(html.contains(r#"src="https://image.tmdb.org/t/p/w500/a.jpg""#));
        assert!(html.contains(r#"alt="Batman""#));
        assert!(html.contains(">Batman</p>"));
        assert!(html.contains("7.2"));
        assert!(html.contains("1989"));
    }

    #[test]
    fn test_card_without_poster_uses_placeholder() {
        let movie = Movie {
            poster_path: None,
            vote_average: None,
            ..batman()
        };

        let html = movie_card(&movie, IMAGE_BASE);

        assert!(html.contains("No poster"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("&#9733;"));
    }

    #[test]
    fn test_grid_renders_one_item_per_movie() {
        let second = Movie {
            id: 2,
            title: "Batman Returns".to_string(),
            ..batman()
        };

        let html = movie_grid(&[batman(), second], IMAGE_BASE);
        assert_eq!(html.matches("<li").count(), 2);

        assert_eq!(movie_grid(&[], IMAGE_BASE).matches("<li").count(), 0);
    }

    #[test]
    fn test_error_message_is_escaped() {
        assert_eq!(
            error_message("<oops>"),
            r#"<p class="text-red-500" role="alert">&lt;oops&gt;</p>"#
        );
    }
}
