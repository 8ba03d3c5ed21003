use addressable_core::{
    Addressable, AddressableRecord, Coordinates, Geocode, Geocoder, GeocoderError, NamedRef,
};
use std::cell::RefCell;

/// Record type that only stores a subset of the addressable fields.
struct Storefront {
    street: String,
    town: String,
    phone: String,
    position: Option<(f64, f64)>,
}

impl Addressable for Storefront {
    fn address(&self) -> Option<&str> {
        Some(&self.street)
    }

    fn city(&self) -> Option<&str> {
        Some(&self.town)
    }

    fn phone(&self) -> Option<&str> {
        Some(&self.phone)
    }

    fn name(&self) -> Option<&str> {
        Some("Corner Store")
    }

    fn lat(&self) -> Option<f64> {
        self.position.map(|(lat, _)| lat)
    }

    fn lon(&self) -> Option<f64> {
        self.position.map(|(_, lon)| lon)
    }
}

struct RecordingGeocoder {
    queries: RefCell<Vec<String>>,
}

impl RecordingGeocoder {
    fn new() -> Self {
        Self {
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl Geocoder for RecordingGeocoder {
    fn geocode(&self, address: &str) -> Result<Geocode, GeocoderError> {
        self.queries.borrow_mut().push(address.to_string());
        Ok(Geocode::at(34.0522, -118.2437))
    }
}

fn los_angeles() -> AddressableRecord {
    let mut record = AddressableRecord::new();
    record.location = Some("34.0522,-118.2437".to_string());
    record
}

#[test]
fn partial_record_types_get_all_behavior() {
    let store = Storefront {
        street: "12 High St".to_string(),
        town: "Oxford".to_string(),
        phone: "555.123.4567".to_string(),
        position: None,
    };

    assert_eq!(store.formatted_address(","), "12 High St, Oxford");
    assert_eq!(store.formatted_address_lines(), "12 High St\nOxford");
    assert_eq!(store.formatted_phone(), "(555) 123-4567");
    assert_eq!(store.formatted_fax(), "");
    assert_eq!(store.formatted_toll_free(), "");
    assert_eq!(store.fullname(), None);
    assert_eq!(store.fullname_or_name().as_deref(), Some("Corner Store"));
    assert_eq!(store.reversename_or_name().as_deref(), Some("Corner Store"));
    assert_eq!(store.distance(0.0, 0.0, "M"), None);
}

#[test]
fn record_formatters_cover_documented_examples() {
    let mut record = AddressableRecord::new();
    record.phone = Some("555-123-4567".to_string());
    record.fax = Some("12345".to_string());
    record.toll_free = Some("8005551234".to_string());
    record.firstname = Some("Jane".to_string());
    record.lastname = Some("Doe".to_string());

    assert_eq!(record.formatted_phone(), "(555) 123-4567");
    assert_eq!(record.formatted_fax(), "12345");
    assert_eq!(record.formatted_toll_free(), "1-800-555-1234");
    assert_eq!(record.fullname().as_deref(), Some("Jane Doe"));
    assert_eq!(record.reversename().as_deref(), Some("Doe, Jane"));

    record.firstname = None;
    assert_eq!(record.fullname().as_deref(), Some("Doe"));
    assert_eq!(record.reversename().as_deref(), Some("Doe"));
}

#[test]
fn distance_los_angeles_to_new_york() {
    let record = los_angeles();

    let km = record.distance(40.7128, -74.0060, "K").unwrap();
    assert!((km - 3940.0).abs() < 39.4, "unexpected km: {km}");

    let km_lower = record.distance(40.7128, -74.0060, "k").unwrap();
    assert_eq!(km, km_lower);

    let miles = record.distance(40.7128, -74.0060, "M").unwrap();
    assert!((miles - 2445.0).abs() < 25.0, "unexpected miles: {miles}");
}

#[test]
fn distance_to_self_is_zero_in_all_units() {
    let record = los_angeles();
    for unit in ["M", "K", "N", "x"] {
        assert_eq!(record.distance(34.0522, -118.2437, unit), Some(0.0));
    }
}

#[test]
fn location_wins_over_discrete_coordinates() {
    let mut record = los_angeles();
    record.lat = Some(40.7128);
    record.lon = Some(-74.0060);

    assert_eq!(
        record.position(),
        Some(Coordinates::new(34.0522, -118.2437).unwrap())
    );

    record.location = None;
    assert_eq!(
        record.position(),
        Some(Coordinates::new(40.7128, -74.0060).unwrap())
    );
    assert_eq!(record.distance(40.7128, -74.0060, "N"), Some(0.0));
}

#[test]
fn missing_or_malformed_position_yields_none() {
    let mut record = AddressableRecord::new();
    assert_eq!(record.distance(1.0, 1.0, "M"), None);

    record.lat = Some(12.0);
    assert_eq!(record.distance(1.0, 1.0, "M"), None);

    record.lon = Some(0.0);
    assert_eq!(record.distance(1.0, 1.0, "M"), None);

    record.lon = Some(20.0);
    record.location = Some("12.0;20.0".to_string());
    assert_eq!(record.distance(1.0, 1.0, "M"), None);

    record.location = Some(String::new());
    assert!(record.distance(1.0, 1.0, "M").is_some());
}

#[test]
fn fetch_geocode_derives_comma_joined_address() {
    let mut record = AddressableRecord::new();
    record.address = Some("200 N Spring St".to_string());
    record.city = Some("Los Angeles".to_string());
    record.state = Some(NamedRef::new(5, "CA"));
    record.postcode = Some("90012".to_string());
    record.country = Some(NamedRef::new(1, "USA"));

    let geocoder = RecordingGeocoder::new();
    let coordinates = record.fetch_coordinates(&geocoder, None).unwrap();
    assert_eq!(coordinates, Coordinates::new(34.0522, -118.2437));

    record.fetch_geocode(&geocoder, Some("")).unwrap();
    record.fetch_coordinates(&geocoder, Some("   ")).unwrap();
    record.fetch_geocode(&geocoder, Some("Union Station")).unwrap();

    assert_eq!(
        *geocoder.queries.borrow(),
        vec![
            "200 N Spring St, Los Angeles, CA 90012, USA".to_string(),
            "200 N Spring St, Los Angeles, CA 90012, USA".to_string(),
            "200 N Spring St, Los Angeles, CA 90012, USA".to_string(),
            "Union Station".to_string(),
        ]
    );
}

#[test]
fn fetch_geocode_without_any_address_skips_provider() {
    let geocoder = RecordingGeocoder::new();
    let record = AddressableRecord::new();

    assert_eq!(record.fetch_geocode(&geocoder, None).unwrap(), None);
    assert_eq!(record.fetch_coordinates(&geocoder, None).unwrap(), None);
    assert!(geocoder.queries.borrow().is_empty());
}
