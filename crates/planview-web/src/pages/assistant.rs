//! Assistant Chat Widget

use leptos::prelude::*;

use crate::api::{self, SessionView, WidgetAction, WidgetState};
use crate::components::MessageBubble;

#[component]
pub fn AssistantWidget() -> impl IntoView {
    let (session, set_session) = signal(None::<SessionView>);
    let (input, set_input) = signal(String::new());
    let (pending, set_pending) = signal(None::<String>);
    let (error, set_error) = signal(None::<String>);

    let widget = move || session.get().map(|s| s.widget).unwrap_or_default();
    let loading = move || pending.get().is_some();

    let apply = move |result: Result<SessionView, String>| match result {
        Ok(view) => {
            set_error.set(None);
            set_session.set(Some(view));
        }
        Err(e) => set_error.set(Some(e)),
    };

    let open = move |_: leptos::ev::MouseEvent| {
        let id = session.get_untracked().map(|s| s.id);
        leptos::task::spawn_local(async move {
            let result = match id {
                Some(id) => api::update_widget(&id, WidgetAction::Open).await,
                None => api::create_session().await,
            };
            apply(result);
        });
    };

    let change = move |action: WidgetAction| {
        let Some(id) = session.get_untracked().map(|s| s.id) else {
            return;
        };
        leptos::task::spawn_local(async move {
            apply(api::update_widget(&id, action).await);
        });
    };

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || pending.get_untracked().is_some() {
            return;
        }
        let Some(id) = session.get_untracked().map(|s| s.id) else {
            return;
        };

        set_input.set(String::new());
        set_pending.set(Some(text.clone()));

        leptos::task::spawn_local(async move {
            apply(api::send_message(&id, &text).await);
            set_pending.set(None);
        });
    };

    view! {
        <Show
            when=move || widget() != WidgetState::Closed
            fallback=move || view! {
                <button class="assistant-launcher" on:click=open>"Ask the assistant"</button>
            }
        >
            <div class="assistant" class:minimized=move || widget() == WidgetState::Minimized>
                <header class="assistant-header">
                    <span>"Virtual Assistant"</span>
                    <div class="controls">
                        <button
                            title="Minimize"
                            on:click=move |_| change(WidgetAction::Toggle)
                        >
                            {move || if widget() == WidgetState::Minimized { "▴" } else { "▾" }}
                        </button>
                        <button title="Close" on:click=move |_| change(WidgetAction::Close)>"×"</button>
                    </div>
                </header>

                <Show when=move || widget() == WidgetState::Expanded>
                    <div class="messages">
                        <For
                            each=move || session.get().map(|s| s.messages).unwrap_or_default()
                            key=|msg| msg.id.clone()
                            children=move |msg| view! { <MessageBubble message=msg /> }
                        />
                        {move || pending.get().map(|text| view! {
                            <div class="message message-user pending">
                                <p class="content">{text}</p>
                            </div>
                            <div class="message loading">"Thinking..."</div>
                        })}
                        {move || error.get().map(|e| view! { <div class="message error">{e}</div> })}
                    </div>

                    <div class="input-area">
                        <textarea
                            placeholder="Ask about your plan..."
                            prop:value=move || input.get()
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" && !ev.shift_key() {
                                    ev.prevent_default();
                                    send();
                                }
                            }
                        />
                        <button
                            on:click=move |_| send()
                            disabled=move || loading() || input.get().trim().is_empty()
                        >
                            {move || if loading() { "..." } else { "Send" }}
                        </button>
                    </div>
                </Show>
            </div>
        </Show>
    }
}
