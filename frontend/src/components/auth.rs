use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use smart_agenda_shared::{ApiErrorKind, FieldErrors, validation};

use crate::services;

const LOGIN_FAILED: &str = "Erro ao fazer login. Tente novamente.";

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub on_login: Callback<()>,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let field_errors = use_state(FieldErrors::default);
    let error_message = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let field_errors = field_errors.clone();
        let error_message = error_message.clone();
        let loading = loading.clone();
        let on_login = props.on_login.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email = email.trim().to_string();
            let password = (*password).clone();

            if let Err(errors) = validation::login(&email, &password) {
                field_errors.set(errors);
                return;
            }
            field_errors.set(FieldErrors::default());
            error_message.set(None);
            loading.set(true);

            let error_message = error_message.clone();
            let loading = loading.clone();
            let on_login = on_login.clone();
            spawn_local(async move {
                match services::users::sign_in(email, password).await {
                    Ok(()) => {
                        loading.set(false);
                        on_login.emit(());
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "login failed");
                        let message = match e.kind {
                            ApiErrorKind::Status { message, .. } if !message.is_empty() => message,
                            _ => LOGIN_FAILED.to_string(),
                        };
                        loading.set(false);
                        error_message.set(Some(message));
                    }
                }
            });
        })
    };

    let email_oninput = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let password_oninput = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-gray-900">
                        {"Smart Agenda"}
                    </h2>
                    <p class="mt-2 text-center text-sm text-gray-600">
                        {"Entre com sua conta"}
                    </p>
                </div>
                <form class="mt-8 space-y-6" {onsubmit}>
                    <div class="space-y-4">
                        <div>
                            <label for="email" class="block text-sm font-medium text-gray-700">{"Email"}</label>
                            <input
                                id="email"
                                type="email"
                                autocomplete="email"
                                class="mt-1 appearance-none block w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 sm:text-sm"
                                placeholder="seu@email.com"
                                value={(*email).clone()}
                                oninput={email_oninput}
                            />
                            if let Some(message) = field_errors.first("email") {
                                <p class="mt-1 text-sm text-red-600">{message}</p>
                            }
                        </div>
                        <div>
                            <label for="password" class="block text-sm font-medium text-gray-700">{"Senha"}</label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                class="mt-1 appearance-none block w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 sm:text-sm"
                                value={(*password).clone()}
                                oninput={password_oninput}
                            />
                            if let Some(message) = field_errors.first("password") {
                                <p class="mt-1 text-sm text-red-600">{message}</p>
                            }
                        </div>
                    </div>

                    if let Some(error) = (*error_message).clone() {
                        <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded relative">
                            {error}
                        </div>
                    }

                    <button
                        type="submit"
                        disabled={*loading}
                        class="w-full flex justify-center py-2 px-4 border border-transparent text-sm font-medium rounded-md text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50 disabled:cursor-not-allowed"
                    >
                        if *loading {
                            {"Entrando..."}
                        } else {
                            {"Entrar"}
                        }
                    </button>
                </form>
            </div>
        </div>
    }
}
