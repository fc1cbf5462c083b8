use std::cell::RefCell;
use std::rc::Rc;

use directory::{
    DataService, DirectoryConfig, DirectoryError, FilterBadge, LegendEntry, LoadState, LoadSummary,
    MapMarker, MapSurface, MapViewController, RadiusFilter, SidebarSurface,
};
use futures::executor::block_on;
use serde_json::{json, Value};
use shared_types::{FoodResourceFeed, GeoBounds, GeoPoint, ResourceRecord};

struct FakeDataService {
    cities: Vec<String>,
    feed: RefCell<Result<FoodResourceFeed, DirectoryError>>,
}

impl FakeDataService {
    fn new(pantries: Vec<Value>, schools: Vec<Value>) -> Self {
        Self {
            cities: vec!["Hartford".to_string(), "New Haven".to_string()],
            feed: RefCell::new(Ok(FoodResourceFeed { pantries, schools })),
        }
    }

    fn failing() -> Self {
        let service = Self::new(Vec::new(), Vec::new());
        *service.feed.borrow_mut() = Err(DirectoryError::load("food resources", "503 Service Unavailable"));
        service
    }
}

impl DataService for FakeDataService {
    async fn get_cities(&self) -> Result<Vec<String>, DirectoryError> {
        Ok(self.cities.clone())
    }

    async fn get_food_resources(&self) -> Result<FoodResourceFeed, DirectoryError> {
        self.feed.borrow().clone()
    }
}

#[derive(Default)]
struct RecordingMap {
    markers: Vec<MapMarker>,
    fits: Vec<Option<GeoBounds>>,
    legend: Vec<LegendEntry>,
    legend_calls: usize,
}

impl MapSurface for RecordingMap {
    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn upsert_marker(&mut self, marker: &MapMarker) {
        match self.markers.iter_mut().find(|m| m.key == marker.key) {
            Some(existing) => *existing = marker.clone(),
            None => self.markers.push(marker.clone()),
        }
    }

    fn fit_marker_bounds(&mut self, bounds: Option<GeoBounds>) {
        self.fits.push(bounds);
    }

    fn add_legend(&mut self, entries: &[LegendEntry]) {
        self.legend = entries.to_vec();
        self.legend_calls += 1;
    }
}

#[derive(Default)]
struct RecordingSidebar {
    rows: Vec<String>,
    total: usize,
    badges: Vec<String>,
    states: Vec<LoadState>,
    scroll_resets: usize,
}

impl SidebarSurface for RecordingSidebar {
    fn render_rows(&mut self, rows: &[ResourceRecord], total: usize) {
        self.rows = rows.iter().map(|r| r.id.clone()).collect();
        self.total = total;
    }

    fn reset_scroll(&mut self) {
        self.scroll_resets += 1;
    }

    fn render_filter_badges(&mut self, badges: &[FilterBadge]) {
        self.badges = badges.iter().map(|b| b.label.clone()).collect();
    }

    fn show_load_state(&mut self, state: &LoadState) {
        self.states.push(state.clone());
    }
}

type Controller = MapViewController<FakeDataService, RecordingMap, RecordingSidebar>;

fn controller(service: FakeDataService) -> Controller {
    MapViewController::new(
        service,
        RecordingMap::default(),
        RecordingSidebar::default(),
        &DirectoryConfig::default(),
    )
}

type LoadLog = Rc<RefCell<Vec<Result<LoadSummary, DirectoryError>>>>;

fn start(controller: &mut Controller) -> LoadLog {
    let log: LoadLog = Rc::default();
    let sink = log.clone();
    block_on(controller.start(move |result| sink.borrow_mut().push(result)));
    log
}

fn pantry(id: usize, category: &str, lat: f64, long: f64) -> Value {
    json!({
        "Id": format!("p{id}"),
        "Category": category,
        "Name": format!("Site {id}"),
        "Town": "Hartford",
        "Address": format!("{id} Main St"),
        "Latitude": lat.to_string(),
        "Longitude": long.to_string(),
        "IsActive": "true",
    })
}

#[test]
fn end_to_end_active_set_and_category_filter() {
    let service = FakeDataService::new(
        vec![
            json!({ "Category": "Food Pantry", "Latitude": "41.1", "Longitude": "-73.1", "IsActive": "true" }),
            json!({ "Category": "Meal Sites", "Latitude": "41.9", "Longitude": "-72.9", "IsActive": "false" }),
        ],
        Vec::new(),
    );
    let mut controller = controller(service);
    let log = start(&mut controller);

    assert_eq!(controller.records().len(), 1);
    assert_eq!(controller.records()[0].category.as_str(), "Food Pantry");
    assert_eq!(controller.load_state(), &LoadState::Ready { records: 1 });
    assert_eq!(
        log.borrow().as_slice(),
        [Ok(LoadSummary {
            total: 2,
            active: 1,
            placeable: 1,
            cities: 2,
        })]
    );

    controller.set_category_filter(vec!["Meal Sites".to_string()]);
    assert!(controller.filtered().is_empty());
    assert!(controller.map().markers.is_empty());
    assert_eq!(controller.map().fits.last(), Some(&None));
    assert_eq!(controller.sidebar().badges, ["Meal Sites"]);
}

#[test]
fn category_filter_selects_and_clearing_restores() {
    let pantries = vec![
        pantry(1, "Food Pantry", 41.76, -72.67),
        pantry(2, "Meal Sites", 41.77, -72.68),
        pantry(3, "Food Pantry", 41.31, -72.93),
    ];
    let schools = vec![json!({ "School Name": "Bulkeley High", "Latitude": 41.74, "Longitude": -72.69 })];
    let mut controller = controller(FakeDataService::new(pantries, schools));
    start(&mut controller);
    assert_eq!(controller.filtered().len(), 4);

    controller.set_category_filter(vec!["Food Pantry".to_string()]);
    let ids: Vec<&str> = controller.filtered().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["pantry:p1", "pantry:p3"]);
    assert_eq!(controller.get_category_filter(), Some(&["Food Pantry".to_string()][..]));
    assert_eq!(controller.map().markers.len(), 2);

    controller.clear_category_filter();
    assert_eq!(controller.get_category_filter(), None);
    assert_eq!(controller.filtered().len(), 4);
    assert!(controller.sidebar().badges.is_empty());
}

#[test]
fn radius_filter_narrows_markers_and_refits() {
    let pantries = vec![
        pantry(1, "Food Pantry", 41.76, -72.74),
        pantry(2, "Meal Sites", 41.77, -72.67),
        pantry(3, "Food Pantry", 41.31, -72.93),
    ];
    let mut controller = controller(FakeDataService::new(pantries, Vec::new()));
    start(&mut controller);
    let fits_before = controller.map().fits.len();

    controller.set_radius_filter(RadiusFilter {
        zip_code: Some("06103".to_string()),
        center: GeoPoint::new(41.7658, -72.6734),
        radius_miles: 10.0,
    });

    assert_eq!(controller.filtered().len(), 2);
    assert_eq!(controller.map().markers.len(), 2);
    assert_eq!(controller.map().fits.len(), fits_before + 1);
    let bounds = controller.map().fits.last().copied().flatten().unwrap();
    assert_eq!(bounds.north_east, GeoPoint::new(41.77, -72.67));
    assert_eq!(controller.sidebar().badges, ["Within 10 mi of 06103"]);

    controller.set_town_filter("West".to_string());
    assert_eq!(controller.get_town_filter(), Some("West"));
    assert!(controller.filtered().is_empty());
    controller.clear_filters();
    assert_eq!(controller.filtered().len(), 3);
    assert_eq!(controller.get_radius_filter(), None);
    assert_eq!(controller.get_town_filter(), None);
}

#[test]
fn sidebar_pages_in_with_scroll_and_resets_on_filter() {
    let pantries = (0..45).map(|i| pantry(i, "Food Pantry", 41.0, -73.0 + i as f64 * 0.01)).collect();
    let mut controller = controller(FakeDataService::new(pantries, Vec::new()));
    start(&mut controller);

    assert_eq!(controller.sidebar().rows.len(), 20);
    assert_eq!(controller.sidebar().total, 45);
    let resets = controller.sidebar().scroll_resets;
    controller.on_scroll(300.0);
    assert_eq!(controller.sidebar().rows.len(), 40);
    assert_eq!(controller.visible().len(), 40);
    assert_eq!(controller.sidebar().scroll_resets, resets);

    controller.set_category_filter(vec!["Food Pantry".to_string()]);
    assert_eq!(controller.sidebar().rows.len(), 20);
    assert_eq!(controller.sidebar().scroll_resets, resets + 1);

    // Scrolling back from the top does not jump ahead several pages.
    controller.on_scroll(0.0);
    assert_eq!(controller.sidebar().rows.len(), 20);
}

#[test]
fn filters_set_before_load_apply_once_data_arrives() {
    let pantries = vec![pantry(1, "Food Pantry", 41.76, -72.67), pantry(2, "Meal Sites", 41.77, -72.68)];
    let mut controller = controller(FakeDataService::new(pantries, Vec::new()));

    controller.set_category_filter(vec!["Meal Sites".to_string()]);
    assert!(controller.filtered().is_empty());

    start(&mut controller);
    let ids: Vec<&str> = controller.filtered().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["pantry:p2"]);
    assert_eq!(controller.map().legend_calls, 1);
    assert_eq!(controller.map().legend.len(), 4);
}

#[test]
fn load_failure_is_reported_and_recoverable() {
    let mut controller = controller(FakeDataService::failing());
    let log = start(&mut controller);

    assert!(matches!(controller.load_state(), LoadState::Failed(msg) if msg.contains("503")));
    assert_eq!(log.borrow().len(), 1);
    assert!(log.borrow()[0].is_err());
    assert_eq!(
        controller.sidebar().states,
        [LoadState::Loading, LoadState::Failed("failed to load food resources: 503 Service Unavailable".to_string())]
    );

    *controller.service().feed.borrow_mut() = Ok(FoodResourceFeed {
        pantries: vec![pantry(1, "Food Pantry", 41.76, -72.67)],
        schools: Vec::new(),
    });
    block_on(controller.reload());
    assert_eq!(controller.load_state(), &LoadState::Ready { records: 1 });
    assert_eq!(log.borrow().len(), 2);
    assert!(log.borrow()[1].is_ok());

    // Callback is spent after the first success.
    block_on(controller.reload());
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn records_at_one_address_share_a_marker() {
    let mut first = pantry(1, "Food Pantry", 41.76, -72.67);
    let mut second = pantry(2, "Meal Sites", 41.76, -72.67);
    first["Address"] = json!("100 Church St");
    second["Address"] = json!("100 church st ");
    let mut controller = controller(FakeDataService::new(vec![first, second], Vec::new()));
    start(&mut controller);

    assert_eq!(controller.map().markers.len(), 1);
    assert_eq!(controller.map().markers[0].entries.len(), 2);
    assert_eq!(controller.sidebar().rows.len(), 2);
}

#[test]
fn pantry_and_school_ids_do_not_collide() {
    let pantry = json!({
        "Id": "1",
        "Category": "Food Pantry",
        "Name": "Westside Pantry",
        "Address": "5 Main St",
        "Latitude": "41.76",
        "Longitude": "-72.67",
    });
    let school = json!({
        "Id": "1",
        "School Name": "Westside Elementary",
        "Address": "5 Main St",
        "Latitude": "41.76",
        "Longitude": "-72.67",
    });
    let mut controller = controller(FakeDataService::new(vec![pantry], vec![school]));
    start(&mut controller);

    assert_eq!(controller.records().len(), 2);
    assert_eq!(controller.sidebar().rows, ["pantry:1", "school:1"]);
    assert_eq!(controller.map().markers.len(), 1);
    let names: Vec<&str> = controller.map().markers[0].entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Westside Pantry", "Westside Elementary"]);
}

#[test]
fn towns_fall_back_to_the_loaded_records() {
    let mut bristol = pantry(1, "Food Pantry", 41.67, -72.95);
    bristol["Town"] = json!(" Bristol ");
    let mut inactive = pantry(3, "Food Pantry", 41.56, -72.65);
    inactive["Town"] = json!("Middletown");
    inactive["IsActive"] = json!("false");
    let pantries = vec![bristol, pantry(2, "Meal Sites", 41.76, -72.67), inactive];

    let mut service = FakeDataService::new(pantries, Vec::new());
    service.cities.clear();
    let mut controller = controller(service);
    start(&mut controller);

    assert_eq!(controller.cities(), ["Bristol", "Hartford"]);
}

#[test]
fn configured_cities_are_kept_as_served() {
    let mut controller = controller(FakeDataService::new(vec![pantry(1, "Food Pantry", 41.76, -72.67)], Vec::new()));
    start(&mut controller);
    assert_eq!(controller.cities(), ["Hartford", "New Haven"]);
}
