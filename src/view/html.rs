use super::{NARRATIVE_PENDING, Narrative, ViewModel};
use crate::{analysis::Statistics, gallery::Gallery};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLE: &str = "
body { font-family: sans-serif; max-width: 960px; margin: 0 auto; padding: 1rem; }
.gallery { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.gallery button { border: none; padding: 0; background: none; cursor: pointer; }
.gallery img { width: 160px; height: 120px; object-fit: cover; }
.images { display: flex; gap: 1rem; }
.images img { max-width: 100%; }
#error { color: #b00020; }
";

/// Renders the whole page for the current view state. All interpolated text,
/// including the narrative, is escaped.
pub fn render_page(view: &ViewModel, gallery: &Gallery) -> String {
    page(view, gallery).into_string()
}

fn page(view: &ViewModel, gallery: &Gallery) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Chair Occupancy" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                h1 { "Chair Occupancy" }

                form action="/upload" method="post" enctype="multipart/form-data" {
                    input #fileInput type="file" name="file" accept="image/*";
                    button type="submit" { "Analyze" }
                }

                @if !gallery.images().is_empty() {
                    h2 { "Or pick an example" }
                    div.gallery {
                        @for image in gallery.images() {
                            form action="/select" method="post" {
                                input type="hidden" name="src" value=(image.src);
                                button type="submit" {
                                    img src=(gallery.thumbnail_url(image)) data-src=(image.src) alt=(image.alt);
                                }
                            }
                        }
                    }
                }

                @if let Some(message) = &view.error {
                    div #error { (message) }
                }

                div.images {
                    @if let Some(uri) = &view.original_image {
                        div #originalContainer {
                            h3 { "Original" }
                            img #originalImage src=(uri) alt="Original image";
                        }
                    }
                    @if let Some(uri) = &view.labeled_image {
                        div #labeledContainer {
                            h3 { "Detections" }
                            img #labeledImage src=(uri) alt="Labeled image";
                        }
                    }
                }

                @if let Some(stats) = &view.statistics {
                    (statistics(stats))
                }

                @if let Some(narrative) = &view.narrative {
                    div #geminiResults {
                        h3 { "AI Summary" }
                        p #geminiText {
                            @match narrative {
                                Narrative::Pending => {
                                    em { (NARRATIVE_PENDING) }
                                }
                                Narrative::Ready(text) => {
                                    (text)
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn statistics(stats: &Statistics) -> Markup {
    html! {
        div #stats {
            h3 { "Analysis Results" }
            p { strong { (stats.people) } " people detected" }
            p {
                strong { (stats.chairs_taken) } " out of " strong { (stats.chairs) }
                " chairs are taken"
            }
            p { strong { (stats.empty_chairs) } " empty chairs" }
            p { strong { "Occupancy estimate: " } (stats.occupancy_range()) }
        }
    }
}
