mod audio;

use leptos::*;
use std::rc::Rc;

use crate::config::SiteConfig;
use crate::model::{ContentStore, Icon, Item, ItemKind, Page, Playback, Section, SectionBody, ViewState};
use crate::render::{self, MemberCard, StarFill};
use audio::WebAudio;

#[component]
pub fn App(config: SiteConfig, content: ContentStore) -> impl IntoView {
    let state = create_rw_signal(ViewState::new(&content));
    let config = store_value(config);
    let content = store_value(content);

    // Fires once per page load; nothing cancels it.
    set_timeout(
        move || {
            if state.try_update(|s| s.finish_loading()).unwrap_or(false) {
                log::info!("Loading overlay dismissed");
            }
        },
        config.with_value(|c| c.loading_delay()),
    );

    let page = create_memo(move |_| state.with(|s| s.page()));

    view! {
        <LoadingOverlay state=state config=config/>
        <div class="app-container">
            <NavBar state=state config=config/>
            <BackgroundMusic state=state config=config/>
            {move || match page.get() {
                Page::Progress => view! { <ProgressPage state=state config=config content=content/> }.into_view(),
                Page::Team => view! { <TeamPage config=config content=content/> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn LoadingOverlay(state: RwSignal<ViewState>, config: StoredValue<SiteConfig>) -> impl IntoView {
    let loading = create_memo(move |_| state.with(|s| s.is_loading()));
    let title = config.with_value(|c| c.title.clone());

    view! {
        <Show when=move || loading.get()>
            <div class="loading-overlay">
                <div class="loading-title">{title.clone()}</div>
            </div>
        </Show>
    }
}

#[component]
fn NavBar(state: RwSignal<ViewState>, config: StoredValue<SiteConfig>) -> impl IntoView {
    let title = config.with_value(|c| c.title.clone());
    let element_id = config.with_value(|c| c.audio.element_id.clone());

    let toggle_audio = move |_| {
        let sync: Rc<dyn Fn(bool)> = Rc::new(move |playing| state.update(|s| s.sync_audio(playing)));
        let audio = WebAudio::find(&element_id, sync);
        if audio.is_none() {
            log::debug!("No #{} element on the page", element_id);
        }
        state.update(|s| {
            s.toggle_audio(audio.as_ref().map(|a| a as &dyn Playback));
        });
    };

    let tabs = move || {
        state
            .with(render::nav_entries)
            .into_iter()
            .map(|entry| {
                let page = entry.page;
                view! {
                    <button
                        class="nav-tab"
                        class:active=entry.active
                        on:click=move |_| state.update(|s| s.select_page(page))
                    >
                        {entry.label}
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <nav class="nav-bar">
            <span class="nav-title">{Icon::Cpu.glyph()} " " {title}</span>
            <div class="nav-tabs">{tabs}</div>
            <button class="audio-toggle" on:click=toggle_audio>
                {move || if state.with(|s| s.is_audio_playing()) { "🔊" } else { "🔇" }}
            </button>
        </nav>
    }
}

#[component]
fn BackgroundMusic(state: RwSignal<ViewState>, config: StoredValue<SiteConfig>) -> impl IntoView {
    let audio = config.with_value(|c| c.audio.clone());

    view! {
        <audio
            id=audio.element_id
            loop=true
            on:play=move |_| state.update(|s| s.sync_audio(true))
            on:pause=move |_| state.update(|s| s.sync_audio(false))
        >
            <source src=audio.source type=audio.mime/>
            "Your browser does not support the audio element."
        </audio>
    }
}

#[component]
fn ProgressPage(
    state: RwSignal<ViewState>,
    config: StoredValue<SiteConfig>,
    content: StoredValue<ContentStore>,
) -> impl IntoView {
    let title = config.with_value(|c| c.title.clone());
    let sections = content.with_value(|c| c.sections.clone());
    let focus = content.with_value(|c| c.focus.clone());

    view! {
        <div class="progress-page">
            <h1 class="page-heading">
                {title} " "
                <button class="link" on:click=move |_| state.update(|s| s.select_page(Page::Team))>
                    "Team"
                </button>
                " Progress"
            </h1>
            {sections
                .into_iter()
                .map(|section| view! { <SectionPanel state=state section=section/> })
                .collect_view()}
            <div class="team-focus">
                <h2>"Team Focus"</h2>
                {focus
                    .into_iter()
                    .map(|point| {
                        view! {
                            <div class="focus-point">
                                <span class="icon">{point.icon.glyph()}</span>
                                <p>
                                    <span class="focus-heading">{point.heading} ":"</span>
                                    " "
                                    {point.text}
                                </p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn SectionPanel(state: RwSignal<ViewState>, section: Section) -> impl IntoView {
    let key = store_value(section.title.clone());
    let body = store_value(section.content);
    let open = create_memo(move |_| key.with_value(|k| state.with(|s| s.is_section_open(k))));

    let on_toggle = move |_| {
        key.with_value(|k| {
            state.update(|s| {
                s.toggle_section(k);
            })
        })
    };

    view! {
        <div class="section">
            <button class="section-header" on:click=on_toggle>
                <span class="icon">{section.icon.glyph()}</span>
                <h2>{section.title}</h2>
                <span class="chevron">{move || if open.get() { "▲" } else { "▼" }}</span>
            </button>
            <Show when=move || open.get()>
                <div class="section-body">
                    {match body.get_value() {
                        SectionBody::Text(text) => view! { <p class="section-text">{text}</p> }.into_view(),
                        SectionBody::Items(items) => view! {
                            <ul class="items">
                                {items
                                    .into_iter()
                                    .map(|item| view! { <ItemRow state=state item=item/> })
                                    .collect_view()}
                            </ul>
                        }
                        .into_view(),
                    }}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn ItemRow(state: RwSignal<ViewState>, item: Item) -> impl IntoView {
    let id = store_value(item.id.clone());
    let details = store_value(item.details);
    let options = store_value(item.options);
    let note_id = render::note_field_id(&item.id);
    let class = match item.kind {
        ItemKind::Issue => "item issue",
        ItemKind::Step => "item step",
    };

    let expanded = create_memo(move |_| id.with_value(|id| state.with(|s| s.is_item_expanded(id))));
    let completed = create_memo(move |_| id.with_value(|id| state.with(|s| s.is_item_completed(id))));
    let note = create_memo(move |_| id.with_value(|id| state.with(|s| s.note(id).to_string())));

    let on_info = move |_| {
        id.with_value(|id| {
            state.update(|s| {
                s.toggle_item_info(id);
            })
        })
    };
    let on_complete = move |_| {
        id.with_value(|id| {
            state.update(|s| {
                s.toggle_item_completion(id);
            })
        })
    };

    view! {
        <li class=class>
            <div class="item-header">
                <h3>{item.title}</h3>
                <div class="item-actions">
                    <button on:click=on_info>"Information"</button>
                    <button class="completion" class:done=move || completed.get() on:click=on_complete>
                        {move || if completed.get() { "✓" } else { "✗" }}
                    </button>
                </div>
            </div>
            <p class="item-summary">{item.summary}</p>
            <Show when=move || expanded.get()>
                <div class="item-info">
                    // Extra intro paragraph above the options; collapsed rows show only the summary.
                    {details.get_value().map(|d| view! { <p class="item-details">{d}</p> })}
                    <h4>"Options:"</h4>
                    <ul class="options">
                        {options.get_value().into_iter().map(|o| view! { <li>{o}</li> }).collect_view()}
                    </ul>
                    <label for=note_id.clone()>"Notes:"</label>
                    <textarea
                        id=note_id.clone()
                        rows=3
                        placeholder="Add your thoughts or plans here..."
                        prop:value=move || note.get()
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            id.with_value(|id| {
                                state.update(|s| {
                                    s.set_note(id, text);
                                })
                            });
                        }
                    ></textarea>
                </div>
            </Show>
        </li>
    }
}

#[component]
fn TeamPage(config: StoredValue<SiteConfig>, content: StoredValue<ContentStore>) -> impl IntoView {
    let team = content.with_value(|c| config.with_value(|cfg| render::team_view(c, cfg)));

    view! {
        <div class="team-page">
            <h1 class="page-heading">{team.heading}</h1>
            <div class="team-grid">
                {team
                    .members
                    .into_iter()
                    .map(|card| view! { <MemberCardView card=card/> })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn MemberCardView(card: MemberCard) -> impl IntoView {
    let message = card.view_more;
    let on_view_more = move |_| {
        if let Err(e) = window().alert_with_message(&message) {
            log::warn!("alert failed: {:?}", e);
        }
    };

    let stars = card
        .stars
        .iter()
        .map(|fill| {
            let class = match fill {
                StarFill::Full => "star full",
                StarFill::Partial => "star partial",
                StarFill::Empty => "star empty",
            };
            view! { <span class=class>"★"</span> }
        })
        .collect_view();

    view! {
        <div class="member-card">
            <img class="member-photo" src=card.image_url alt=card.image_alt/>
            <h3 class="member-name">{card.name}</h3>
            <span class="badge">{card.role}</span>
            <p class="favorite">"Favorite part: " {card.favorite_part}</p>
            <blockquote class="quote">"\"" {card.quote} "\""</blockquote>
            <div class="rating">
                <span>"Robot Rating:"</span>
                <span class="stars">{stars}</span>
                <span class="rating-value">{card.rating_label}</span>
            </div>
            <button class="view-more" on:click=on_view_more>"View More"</button>
        </div>
    }
}
