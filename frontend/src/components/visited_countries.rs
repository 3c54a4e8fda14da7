use shared::countries::{sorted_by_name, VisitedCountries};
use shared::Country;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VisitedCountriesProps {
    pub countries: Vec<Country>,
}

/// Visited-country list with a lookup box that answers "visited or not"
/// for an ISO code or map name, the way the world map colours countries
#[function_component(VisitedCountriesPanel)]
pub fn visited_countries_panel(props: &VisitedCountriesProps) -> Html {
    let lookup = use_state(String::new);
    let visited = use_memo(props.countries.clone(), |countries| VisitedCountries::from_countries(countries));
    let sorted = sorted_by_name(&props.countries);

    let on_lookup = {
        let lookup = lookup.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            lookup.set(input.value());
        })
    };

    html! {
        <section class="visited-countries">
            <h2>{format!("🌍 Pays visités ({})", visited.len())}</h2>
            {if sorted.is_empty() {
                html! { <p class="empty-state">{"Aucun pays visité pour l'instant."}</p> }
            } else {
                html! {
                    <ul class="country-list">
                        {for sorted.iter().map(|country| html! {
                            <li key={country.code_iso.clone()}>
                                <span class="country-code">{country.code_iso.to_uppercase()}</span>
                                {" "}
                                {&country.nom}
                            </li>
                        })}
                    </ul>
                }
            }}
            <div class="country-lookup">
                <input
                    type="text"
                    class="input"
                    placeholder="Code ou nom (fr, jpn, morocco...)"
                    value={(*lookup).clone()}
                    oninput={on_lookup}
                />
                {if !lookup.trim().is_empty() {
                    if visited.contains(&lookup) {
                        html! { <span class="visited-yes">{"✅ Visité"}</span> }
                    } else {
                        html! { <span class="visited-no">{"❌ Non visité"}</span> }
                    }
                } else { html! {} }}
            </div>
        </section>
    }
}
