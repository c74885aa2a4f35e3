use leptos::prelude::*;

use crate::dogs::Dogs;
use crate::home::Home;
use crate::palette::ColorPalette;
use crate::space_images::SpaceImages;

/// Which explorer is on screen. Plain view switching, no router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Page {
    Home,
    SpaceImages,
    Dogs,
    ColorPalette,
}

impl Page {
    pub(crate) fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::SpaceImages => "Space Images",
            Page::Dogs => "Dogs",
            Page::ColorPalette => "Color Palette",
        }
    }
}

/// Newtype so the page signal has a distinct context type.
#[derive(Clone, Copy)]
pub(crate) struct CurrentPage(pub RwSignal<Page>);

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    let page: RwSignal<Page> = RwSignal::new(Page::Home);
    provide_context(CurrentPage(page));

    view! {
        <div style="min-height: 100vh; background: #0f1117; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif;">
            <Header />
            <main style="max-width: 960px; margin: 0 auto; padding: 24px 16px;">
                {move || match page.get() {
                    Page::Home => view! { <Home /> }.into_any(),
                    Page::SpaceImages => view! { <SpaceImages /> }.into_any(),
                    Page::Dogs => view! { <Dogs /> }.into_any(),
                    Page::ColorPalette => view! { <ColorPalette /> }.into_any(),
                }}
            </main>
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    let CurrentPage(page) = expect_context();
    let entries = [
        Page::Home,
        Page::SpaceImages,
        Page::Dogs,
        Page::ColorPalette,
    ];

    view! {
        <header style="display: flex; align-items: center; gap: 8px; padding: 12px 16px; background: #13161f; border-bottom: 1px solid #282c3e;">
            <span style="font-weight: 700; font-size: 1.05rem; margin-right: 16px;">"AllAPIs"</span>
            {entries
                .into_iter()
                .map(|entry| {
                    view! {
                        <button
                            style=move || {
                                let active = page.get() == entry;
                                format!(
                                    "background: {}; color: {}; border: 1px solid #282c3e; border-radius: 6px; padding: 6px 12px; cursor: pointer; font-size: 0.85rem;",
                                    if active { "#1a1d2a" } else { "transparent" },
                                    if active { "#f5c542" } else { "#9a9590" },
                                )
                            }
                            on:click=move |_| page.set(entry)
                        >
                            {entry.title()}
                        </button>
                    }
                })
                .collect_view()}
        </header>
    }
}
