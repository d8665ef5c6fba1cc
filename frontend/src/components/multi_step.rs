use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MultiStepProps {
    pub current: u8,
    pub total: u8,
}

/// "Passo X de Y" with one bar per step.
#[function_component(MultiStep)]
pub fn multi_step(props: &MultiStepProps) -> Html {
    html! {
        <div class="space-y-2">
            <p class="text-sm text-gray-600">{format!("Passo {} de {}", props.current, props.total)}</p>
            <div class="flex gap-2">
                {(1..=props.total).map(|step| {
                    let color = if props.current >= step { "bg-blue-600" } else { "bg-gray-200" };
                    html! { <div key={step.to_string()} class={classes!("h-1", "flex-1", "rounded", color)} /> }
                }).collect::<Html>()}
            </div>
        </div>
    }
}
