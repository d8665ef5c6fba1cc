use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use smart_agenda_shared::contact::ContactDialog;
use smart_agenda_shared::{FieldErrors, SubmitError};

use crate::components::toast::use_toast;
use crate::hooks::use_query_client;
use crate::services::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ContactDialogProps {
    pub organization_id: String,
    pub initial: ContactDialog,
    pub on_close: Callback<()>,
    /// Fired after a create or update went through
    #[prop_or_default]
    pub on_success: Callback<()>,
}

#[function_component(ContactDialogModal)]
pub fn contact_dialog_modal(props: &ContactDialogProps) -> Html {
    let dialog = use_state(|| props.initial.clone());
    let field_errors = use_state(FieldErrors::default);
    let saving = use_state(|| false);
    let client = use_query_client();
    let toast = use_toast();

    let set_field = |apply: fn(&mut ContactDialog, String)| {
        let dialog = dialog.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*dialog).clone();
            apply(&mut next, input.value());
            dialog.set(next);
        })
    };
    let name_oninput = set_field(|dialog, value| {
        if let Some(draft) = dialog.draft_mut() {
            draft.name = value;
        }
    });
    let phone_oninput = set_field(|dialog, value| {
        if let Some(draft) = dialog.draft_mut() {
            draft.phone = value;
        }
    });

    let start_edit = {
        let dialog = dialog.clone();
        Callback::from(move |_: MouseEvent| dialog.set((*dialog).clone().start_edit()))
    };

    let cancel_edit = {
        let dialog = dialog.clone();
        let field_errors = field_errors.clone();
        Callback::from(move |_: MouseEvent| {
            field_errors.set(FieldErrors::default());
            dialog.set((*dialog).clone().cancel_edit());
        })
    };

    let onsubmit = {
        let dialog = dialog.clone();
        let field_errors = field_errors.clone();
        let saving = saving.clone();
        let organization_id = props.organization_id.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let submit = match dialog.submit(&organization_id) {
                Ok(Some(submit)) => submit,
                Ok(None) => return,
                Err(SubmitError::Invalid(errors)) => {
                    field_errors.set(errors);
                    return;
                }
                Err(SubmitError::Api(e)) => {
                    tracing::error!(error = %e, "could not build contact request");
                    toast.error("Erro ao salvar contato", Some(e.user_message()));
                    return;
                }
            };
            field_errors.set(FieldErrors::default());
            saving.set(true);

            let current = (*dialog).clone();
            let creating = matches!(current, ContactDialog::Create { .. });
            let dialog = dialog.clone();
            let saving = saving.clone();
            let client = client.clone();
            let toast = toast.clone();
            let organization_id = organization_id.clone();
            let on_success = on_success.clone();
            spawn_local(async move {
                match ApiClient::execute_unit(submit.request).await {
                    Ok(()) => {
                        client.apply(&submit.mutation);
                        toast.success(if creating {
                            "Contato criado com sucesso"
                        } else {
                            "Contato atualizado com sucesso"
                        });
                        dialog.set(current.saved(&organization_id));
                        on_success.emit(());
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "contact save failed");
                        toast.error("Erro ao salvar contato", Some(e.user_message()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let (name, phone) = match &*dialog {
        ContactDialog::View { customer } => (customer.name.clone(), customer.phone.clone()),
        ContactDialog::Create { draft } | ContactDialog::Edit { draft, .. } => {
            (draft.name.clone(), draft.phone.clone())
        }
    };
    let readonly = !dialog.is_editable();
    let busy = *saving;
    let input_class = "mt-1 block w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 sm:text-sm read-only:bg-gray-50";

    html! {
        <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/40">
            <div class="bg-white rounded-lg shadow-xl w-full max-w-md p-6">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-lg font-semibold text-gray-900">{dialog.title()}</h2>
                    <button type="button" onclick={on_close} class="text-gray-400 hover:text-gray-600">{"✕"}</button>
                </div>
                <form class="space-y-4" {onsubmit}>
                    <div>
                        <label for="contact-name" class="block text-sm font-medium text-gray-700">{"Nome"}</label>
                        <input
                            id="contact-name"
                            type="text"
                            class={input_class}
                            placeholder="Digite o nome completo"
                            value={name}
                            readonly={readonly}
                            oninput={name_oninput}
                        />
                        if let Some(message) = field_errors.first("name") {
                            <p class="mt-1 text-sm text-red-600">{message}</p>
                        }
                    </div>
                    <div>
                        <label for="contact-phone" class="block text-sm font-medium text-gray-700">{"Telefone"}</label>
                        <input
                            id="contact-phone"
                            type="tel"
                            class={input_class}
                            placeholder="(XX) XXXXX-XXXX"
                            value={phone}
                            readonly={readonly}
                            oninput={phone_oninput}
                        />
                        if let Some(message) = field_errors.first("phone") {
                            <p class="mt-1 text-sm text-red-600">{message}</p>
                        }
                    </div>

                    <div class="flex justify-end gap-2 pt-2">
                        {match &*dialog {
                            ContactDialog::View { .. } => html! {
                                <button type="button" onclick={start_edit} class="px-4 py-2 rounded-md bg-blue-600 text-white text-sm hover:bg-blue-700">
                                    {"Editar"}
                                </button>
                            },
                            ContactDialog::Edit { .. } => html! {
                                <>
                                    <button type="button" onclick={cancel_edit} disabled={busy} class="px-4 py-2 rounded-md border border-gray-300 text-sm text-gray-700 hover:bg-gray-50">
                                        {"Cancelar"}
                                    </button>
                                    <button type="submit" disabled={busy} class="px-4 py-2 rounded-md bg-blue-600 text-white text-sm hover:bg-blue-700 disabled:opacity-50">
                                        {if busy { "Salvando..." } else { "Salvar" }}
                                    </button>
                                </>
                            },
                            ContactDialog::Create { .. } => html! {
                                <button type="submit" disabled={busy} class="px-4 py-2 rounded-md bg-blue-600 text-white text-sm hover:bg-blue-700 disabled:opacity-50">
                                    {if busy { "Criando..." } else { "Criar" }}
                                </button>
                            },
                        }}
                    </div>
                </form>
            </div>
        </div>
    }
}
