use anyhow::Result;
use atlas_core::{provinces::ProvinceEntry, Company};
use clap::ValueEnum;
use std::io::Write;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat { Text, Json, Jsonl, Csv }

fn opt(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("")
}

fn coord(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Table view of the registry: id, name, sector, province, region.
pub fn write_companies(format: OutputFormat, companies: &[Company], mut out: impl Write) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let width = companies.iter().map(|c| c.name.chars().count()).max().unwrap_or(4).max(4);
            writeln!(out, "{:>4}  {:<width$}  {:<18}  {:<16}  {}", "ID", "Name", "Sector", "Province", "Region")?;
            for c in companies {
                writeln!(
                    out,
                    "{:>4}  {:<width$}  {:<18}  {:<16}  {}",
                    c.id,
                    c.name,
                    opt(&c.sector),
                    opt(&c.province),
                    opt(&c.region)
                )?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(companies)?)?;
        }
        OutputFormat::Jsonl => {
            for c in companies {
                writeln!(out, "{}", serde_json::to_string(c)?)?;
            }
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut out);
            wtr.write_record(["id","name","sector","province","region","latitude","longitude","employee_link"])?;
            for c in companies {
                wtr.write_record([
                    c.id.to_string(),
                    c.name.clone(),
                    opt(&c.sector).to_string(),
                    opt(&c.province).to_string(),
                    opt(&c.region).to_string(),
                    coord(c.latitude),
                    coord(c.longitude),
                    opt(&c.employee_link).to_string(),
                ])?;
            }
            wtr.flush()?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Full form view of one company.
pub fn write_company(company: &Company, mut out: impl Write) -> Result<()> {
    let rows = [
        ("ID", company.id.to_string()),
        ("Name", company.name.clone()),
        ("Sector", opt(&company.sector).to_string()),
        ("Province", opt(&company.province).to_string()),
        ("Region", opt(&company.region).to_string()),
        ("Latitude", coord(company.latitude)),
        ("Longitude", coord(company.longitude)),
        ("Employee link", opt(&company.employee_link).to_string()),
    ];
    for (label, value) in rows {
        writeln!(out, "{:<14} {}", format!("{label}:"), value)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_provinces(format: OutputFormat, entries: &[ProvinceEntry], mut out: impl Write) -> Result<()> {
    let rows = entries.iter().map(|p| {
        serde_json::json!({
            "province": p.name,
            "region": p.region,
            "lon": p.reference.map(|r| r.0),
            "lat": p.reference.map(|r| r.1),
        })
    });
    match format {
        OutputFormat::Text => {
            for p in entries {
                let reference = p
                    .reference
                    .map(|(lon, lat)| format!("{lat:.4}, {lon:.4}"))
                    .unwrap_or_default();
                writeln!(out, "{:<24} {:<22} {}", p.name, p.region.unwrap_or("-"), reference)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&rows.collect::<Vec<_>>())?)?;
        }
        OutputFormat::Jsonl => {
            for row in rows {
                writeln!(out, "{}", serde_json::to_string(&row)?)?;
            }
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut out);
            wtr.write_record(["province","region","lon","lat"])?;
            for p in entries {
                wtr.write_record([
                    p.name.to_string(),
                    p.region.unwrap_or_default().to_string(),
                    coord(p.reference.map(|r| r.0)),
                    coord(p.reference.map(|r| r.1)),
                ])?;
            }
            wtr.flush()?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::CompanyId;

    fn company() -> Company {
        Company {
            id: CompanyId(7),
            name: "Hisdesat".into(),
            sector: Some("Satelites".into()),
            province: Some("Madrid".into()),
            region: Some("Madrid".into()),
            latitude: Some(40.45),
            longitude: None,
            employee_link: None,
        }
    }

    #[test]
    fn csv_leaves_missing_fields_blank() {
        let mut out = Vec::new();
        write_companies(OutputFormat::Csv, &[company()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,name,sector,province,region,latitude,longitude,employee_link"));
        assert_eq!(lines.next(), Some("7,Hisdesat,Satelites,Madrid,Madrid,40.45,,"));
    }

    #[test]
    fn jsonl_is_one_object_per_company() {
        let mut out = Vec::new();
        write_companies(OutputFormat::Jsonl, &[company(), company()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        let v: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(v["id"], 7);
        assert!(v["longitude"].is_null());
    }

    struct FullDisk(Vec<u8>);

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.write(buf)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left on device"))
        }
    }

    #[test]
    fn flush_errors_are_reported_for_every_format() {
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Jsonl, OutputFormat::Csv] {
            let err = write_companies(format, &[company()], FullDisk(Vec::new())).unwrap_err();
            assert!(err.to_string().contains("no space"), "{format:?}: {err}");
        }
    }

    #[test]
    fn province_text_marks_missing_region() {
        let mut out = Vec::new();
        write_provinces(OutputFormat::Text, atlas_core::provinces::PROVINCES, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), atlas_core::provinces::PROVINCES.len());
        assert!(text.lines().last().unwrap().starts_with("Otra"));
    }
}
