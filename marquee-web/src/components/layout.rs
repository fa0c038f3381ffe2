//! Layout components - page shell

use axum::response::Html;

/// Wraps page content in the shared HTML document shell.
pub fn render_page(title: &str, content: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
        <html lang="en">
        <head>
            <title>{title} - Marquee</title>
            <meta charset="utf-8">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <script src="https://cdn.tailwindcss.com"></script>
            <script src="https://unpkg.com/htmx.org@1.9.10"></script>
            <script>
                tailwind.config = {{
                    theme: {{
                        extend: {{
                            colors: {{
                                'marquee': {{
                                    400: '#d6c7ff',
                                    500: '#ab8bff',
                                    900: '#030014'
                                }}
                            }}
                        }}
                    }}
                }}
            </script>
            <style>
                .htmx-indicator {{ display: none; }}
                .htmx-request .htmx-indicator {{ display: flex; }}
                .htmx-request.htmx-indicator {{ display: flex; }}
                .text-gradient {{
                    background: linear-gradient(90deg, #d6c7ff 0%, #ab8bff 100%);
                    -webkit-background-clip: text;
                    background-clip: text;
                    color: transparent;
                }}
            </style>
        </head>
        <body class="bg-marquee-900 text-white min-h-screen font-sans">
            <main class="max-w-7xl mx-auto px-4 py-10">
                {content}
            </main>
        </body>
        </html>"#
    ))
}

/// Renders the hero header above the search box.
pub fn hero_header(search_html: &str) -> String {
    format!(
        r#"<header class="text-center mb-12">
            <h1 class="text-4xl sm:text-5xl font-bold max-w-3xl mx-auto leading-tight">
                Find <span class="text-gradient">Movies</span> You'll Enjoy Without the Hassle
            </h1>
            <div class="mt-10 max-w-3xl mx-auto">
                {search_html}
            </div>
        </header>"#
    )
}
