use serde::Serialize;

use crate::models::{BusinessPageData, CityPageData, PagesData, StatePageData};

/// Static pages appended after the generated ones, as `(path, component)`.
pub const STATIC_ROUTES: [(&str, &str); 4] = [
    ("/about", "AboutPage"),
    ("/contact", "ContactPage"),
    ("/blog", "BlogPage"),
    ("/add-listing", "AddListingPage"),
];

/// Contents of `routesConfig.json`.
#[derive(Debug, Serialize)]
pub struct RoutesConfig<'a> {
    pub routes: Vec<Route<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Route<'a> {
    pub path: String,
    pub component: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<RouteProps<'a>>,
}

/// Serializes as `{"cityData": …}`, `{"stateData": …}` or `{"businessData": …}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteProps<'a> {
    CityData(&'a CityPageData),
    StateData(&'a StatePageData),
    BusinessData(&'a BusinessPageData),
}

impl<'a> Route<'a> {
    fn page(path: &str, component: &'static str) -> Self {
        Route {
            path: path.to_string(),
            component,
            props: None,
        }
    }
}

pub fn build_routes(pages: &PagesData) -> RoutesConfig<'_> {
    let mut routes = vec![Route::page("/", "HomePage")];
    routes.extend(pages.city_pages.iter().map(|city| Route {
        path: format!("/city/{}", city.slug),
        component: "CityPage",
        props: Some(RouteProps::CityData(city)),
    }));
    routes.extend(pages.state_pages.iter().map(|state| Route {
        path: format!("/state/{}", state.slug),
        component: "StatePage",
        props: Some(RouteProps::StateData(state)),
    }));
    routes.extend(pages.business_pages.iter().map(|business| Route {
        path: format!("/business/{}", business.slug),
        component: "BusinessPage",
        props: Some(RouteProps::BusinessData(business)),
    }));
    routes.extend(
        STATIC_ROUTES
            .iter()
            .map(|&(path, component)| Route::page(path, component)),
    );
    RoutesConfig { routes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::generate;
    use crate::source::SourceTables;
    use std::path::Path;

    #[test]
    fn route_order_and_props() {
        let tables = SourceTables::load(Path::new("tests/fixtures/directory")).unwrap();
        let pages = generate(&tables, "Electrolysis").unwrap();
        let config = build_routes(&pages);

        let paths: Vec<&str> = config.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths.len(), 1 + 4 + 2 + 5 + 4);
        assert_eq!(paths[0], "/");
        assert_eq!(paths[1], "/city/austin-te");
        assert_eq!(paths[5], "/state/texas");
        assert_eq!(paths[7], "/business/smooth-skin-spa-7");
        assert_eq!(&paths[12..], &["/about", "/contact", "/blog", "/add-listing"]);

        let json = serde_json::to_value(&config).unwrap();
        let home = &json["routes"][0];
        assert_eq!(home["component"], "HomePage");
        assert!(home.get("props").is_none());
        assert_eq!(json["routes"][1]["props"]["cityData"]["cityName"], "Austin");
        assert_eq!(json["routes"][5]["props"]["stateData"]["businessCount"], 4);
        assert_eq!(
            json["routes"][7]["props"]["businessData"]["business"]["id"],
            7
        );
    }
}
