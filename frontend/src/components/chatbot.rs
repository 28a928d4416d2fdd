use leptos::prelude::*;
use leptos::task::spawn_local;
use restohub_shared::models::{ChatMessage, ChatSender};

use crate::components::icons::{MessageSquare, Send, Trash2};
use crate::components::nav::TopNav;
use crate::session::use_session;
use crate::web::dialog::confirm;

/// 聊天助手：一问一答的回合制交互
///
/// 用户消息先乐观上屏，助手回复落地后追加；失败以气泡内提示呈现。
#[component]
pub fn ChatbotPage() -> impl IntoView {
    let session = use_session();

    let messages = RwSignal::new(Vec::<ChatMessage>::new());
    let (input, set_input) = signal(String::new());
    let (sending, set_sending) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load_history = move || {
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api.chat_history().await {
                    Ok(history) => messages.set(history),
                    Err(e) => set_error_msg.set(Some(format!("历史记录加载失败: {}", e))),
                }
            });
        }
    };

    Effect::new(move |_| {
        let state = session.state.get();
        if state.is_authenticated() && !state.is_loading {
            load_history();
        }
    });

    let on_send = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let text = input.get_untracked().trim().to_string();
        if text.is_empty() || sending.get_untracked() {
            return;
        }

        let state = session.state.get_untracked();
        let Some(api) = state.api.clone() else {
            return;
        };

        // 乐观上屏
        messages.update(|list| {
            list.push(ChatMessage {
                sender: ChatSender::User,
                content: text.clone(),
                sent_at: None,
            });
        });
        set_input.set(String::new());
        set_error_msg.set(None);
        set_sending.set(true);

        spawn_local(async move {
            match api.chat_send(&text).await {
                Ok(reply) => {
                    messages.update(|list| {
                        list.push(ChatMessage {
                            sender: ChatSender::Bot,
                            content: reply.reply,
                            sent_at: None,
                        });
                    });
                }
                Err(e) => {
                    // 用户消息保留在屏上，供重新发送时参考
                    set_error_msg.set(Some(format!("发送失败: {}", e)));
                }
            }
            set_sending.set(false);
        });
    };

    let on_clear = move |_| {
        if !confirm("确定清空全部对话历史？") {
            return;
        }
        let state = session.state.get_untracked();
        if let Some(api) = state.api.clone() {
            spawn_local(async move {
                match api.chat_clear().await {
                    Ok(()) => messages.set(Vec::new()),
                    Err(e) => set_error_msg.set(Some(format!("清空失败: {}", e))),
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-3xl mx-auto space-y-8">
                <TopNav />

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex items-center justify-between">
                            <h2 class="card-title">
                                <MessageSquare attr:class="h-5 w-5" />
                                "平台助手"
                            </h2>
                            <button
                                class="btn btn-ghost btn-sm text-error gap-1"
                                on:click=on_clear
                                disabled=move || messages.with(|m| m.is_empty())
                            >
                                <Trash2 attr:class="h-4 w-4" /> "清空历史"
                            </button>
                        </div>

                        <div class="h-96 overflow-y-auto space-y-2 py-4">
                            <Show when=move || messages.with(|m| m.is_empty())>
                                <div class="text-center text-base-content/50 pt-16">
                                    "问我任何关于餐厅、菜单或预订的问题。"
                                </div>
                            </Show>
                            <For
                                each=move || messages.get().into_iter().enumerate().collect::<Vec<_>>()
                                key=|(index, message)| (*index, message.content.clone())
                                children=move |(_, message)| {
                                    let is_user = message.sender == ChatSender::User;
                                    let chat_class = if is_user { "chat chat-end" } else { "chat chat-start" };
                                    let bubble_class = if is_user {
                                        "chat-bubble chat-bubble-primary"
                                    } else {
                                        "chat-bubble"
                                    };
                                    view! {
                                        <div class=chat_class>
                                            <div class=bubble_class>{message.content.clone()}</div>
                                        </div>
                                    }
                                }
                            />
                            <Show when=move || sending.get()>
                                <div class="chat chat-start">
                                    <div class="chat-bubble">
                                        <span class="loading loading-dots loading-sm"></span>
                                    </div>
                                </div>
                            </Show>
                        </div>

                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap()}</span>
                            </div>
                        </Show>

                        <form class="flex gap-2" on:submit=on_send>
                            <input
                                type="text"
                                placeholder="输入消息..."
                                on:input=move |ev| set_input.set(event_target_value(&ev))
                                prop:value=input
                                class="input input-bordered flex-1"
                            />
                            <button
                                type="submit"
                                class="btn btn-primary gap-1"
                                disabled=move || sending.get()
                            >
                                <Send attr:class="h-4 w-4" /> "发送"
                            </button>
                        </form>
                    </div>
                </div>
            </div>
        </div>
    }
}
