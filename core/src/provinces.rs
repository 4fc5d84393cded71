//! Static reference table of Spanish provinces.
//!
//! Each entry maps a province to its autonomous region and a reference
//! `(lon, lat)` near the provincial capital. The reference coordinate is only
//! a hint for the user; it never overwrites coordinates they entered.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProvinceEntry {
    pub name: &'static str,
    pub region: Option<&'static str>,
    /// `(lon, lat)` in decimal degrees.
    pub reference: Option<(f64, f64)>,
}

const fn entry(name: &'static str, region: &'static str, lon: f64, lat: f64) -> ProvinceEntry {
    ProvinceEntry { name, region: Some(region), reference: Some((lon, lat)) }
}

/// Name of the catch-all entry that carries no region and no coordinate.
pub const OTHER: &str = "Otra";

pub static PROVINCES: &[ProvinceEntry] = &[
    entry("A Coruna", "Galicia", -8.4115, 43.3623),
    entry("Albacete", "Castilla-La Mancha", -1.8585, 38.9943),
    entry("Alicante", "Comunidad Valenciana", -0.4810, 38.3452),
    entry("Almeria", "Andalucia", -2.4637, 36.8381),
    entry("Asturias", "Asturias", -5.8449, 43.3614),
    entry("Avila", "Castilla y Leon", -4.7114, 40.6566),
    entry("Badajoz", "Extremadura", -6.9706, 38.8794),
    entry("Barcelona", "Cataluna", 2.1734, 41.3851),
    entry("Bizkaia", "Pais Vasco", -2.9253, 43.2630),
    entry("Burgos", "Castilla y Leon", -3.6969, 42.3439),
    entry("Caceres", "Extremadura", -6.3724, 39.4753),
    entry("Cadiz", "Andalucia", -6.2894, 36.5271),
    entry("Cantabria", "Cantabria", -3.8044, 43.4623),
    entry("Castellon", "Comunidad Valenciana", -0.0524, 39.9864),
    entry("Ceuta", "Ceuta", -5.3162, 35.8894),
    entry("Ciudad Real", "Castilla-La Mancha", -3.9289, 38.9848),
    entry("Cordoba", "Andalucia", -4.7794, 37.8882),
    entry("Cuenca", "Castilla-La Mancha", -2.1374, 40.0704),
    entry("Gipuzkoa", "Pais Vasco", -2.0000, 43.1500),
    entry("Girona", "Cataluna", 2.8214, 41.9794),
    entry("Granada", "Andalucia", -3.5986, 37.1773),
    entry("Guadalajara", "Castilla-La Mancha", -3.1614, 40.6322),
    entry("Huelva", "Andalucia", -6.9447, 37.2614),
    entry("Huesca", "Aragon", -0.4082, 42.1401),
    entry("Illes Balears", "Islas Baleares", 2.6502, 39.5696),
    entry("Jaen", "Andalucia", -3.7903, 37.7796),
    entry("La Rioja", "La Rioja", -2.4450, 42.4650),
    entry("Las Palmas", "Canarias", -15.4138, 28.1235),
    entry("Leon", "Castilla y Leon", -5.5671, 42.5987),
    entry("Lleida", "Cataluna", 0.6217, 41.6148),
    entry("Lugo", "Galicia", -7.5560, 43.0097),
    entry("Madrid", "Madrid", -3.7038, 40.4168),
    entry("Malaga", "Andalucia", -4.4214, 36.7213),
    entry("Melilla", "Melilla", -2.9388, 35.2923),
    entry("Murcia", "Murcia", -1.1307, 37.9922),
    entry("Navarra", "Navarra", -1.6440, 42.8125),
    entry("Ourense", "Galicia", -7.8640, 42.3360),
    entry("Palencia", "Castilla y Leon", -4.5288, 42.0097),
    entry("Pontevedra", "Galicia", -8.6455, 42.4337),
    entry("Salamanca", "Castilla y Leon", -5.6640, 40.9701),
    entry("Santa Cruz de Tenerife", "Canarias", -16.2519, 28.4636),
    entry("Segovia", "Castilla y Leon", -4.1184, 40.9429),
    entry("Sevilla", "Andalucia", -5.9845, 37.3891),
    entry("Soria", "Castilla y Leon", -2.4638, 41.7636),
    entry("Tarragona", "Cataluna", 1.2445, 41.1189),
    entry("Teruel", "Aragon", -1.1065, 40.3456),
    entry("Toledo", "Castilla-La Mancha", -4.0273, 39.8628),
    entry("Valencia", "Comunidad Valenciana", -0.3763, 39.4699),
    entry("Valladolid", "Castilla y Leon", -4.7245, 41.6523),
    entry("Zamora", "Castilla y Leon", -5.7448, 41.5036),
    entry("Zaragoza", "Aragon", -0.8773, 41.6561),
    entry("Alava", "Pais Vasco", -2.6726, 42.8467),
    ProvinceEntry { name: OTHER, region: None, reference: None },
];

pub fn lookup(province: &str) -> Option<&'static ProvinceEntry> {
    PROVINCES.iter().find(|p| p.name == province)
}

pub fn region_for(province: &str) -> Option<&'static str> {
    lookup(province).and_then(|p| p.region)
}

pub fn reference_coordinate_for(province: &str) -> Option<(f64, f64)> {
    lookup(province).and_then(|p| p.reference)
}

/// Province names in table order, `Otra` last.
pub fn all_province_names() -> Vec<&'static str> {
    PROVINCES.iter().map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_province_resolves() {
        assert_eq!(region_for("Madrid"), Some("Madrid"));
        assert_eq!(region_for("Bizkaia"), Some("Pais Vasco"));
        assert_eq!(reference_coordinate_for("Sevilla"), Some((-5.9845, 37.3891)));
    }

    #[test]
    fn other_entry_has_nothing() {
        let other = lookup(OTHER).unwrap();
        assert_eq!(other.region, None);
        assert_eq!(other.reference, None);
        assert_eq!(region_for("Nowhereville"), None);
    }

    #[test]
    fn names_keep_table_order() {
        let names = all_province_names();
        assert_eq!(names.len(), 53);
        assert_eq!(names.first(), Some(&"A Coruna"));
        assert_eq!(names.last(), Some(&OTHER));
    }
}
