use crate::{
    catalog::Summary,
    data::{Cake, Loaded},
};
use serde::Serialize;

/// Human readable report: load counters, a preview of the first transactions,
/// the cake catalog and the totals.
pub(crate) fn write_report<W: std::io::Write>(
    mut writer: W,
    loaded: &Loaded,
    unique: &[Cake],
    summary: &Summary,
    preview: usize,
) -> Result<(), anyhow::Error> {
    let stats = &loaded.stats;
    writeln!(
        writer,
        "Loaded: {} | blank skipped: {} | malformed skipped: {} | duplicates skipped: {}",
        stats.ok, stats.skipped_blank, stats.skipped_bad, stats.skipped_dup
    )?;

    let shown = loaded.rows.len().min(preview);
    writeln!(writer, "\n=== First {shown} transactions ===")?;
    for tx in loaded.rows.iter().take(preview) {
        writeln!(
            writer,
            "{} | {} | {} | {} | {}",
            tx.transaction_no, tx.items, tx.datetime, tx.daypart, tx.daytype
        )?;
    }

    writeln!(writer, "\n=== Unique cakes by name ===")?;
    for cake in unique {
        writeln!(writer, "- {}", cake.name)?;
    }

    writeln!(writer, "\nValid transactions: {}", summary.transactions)?;
    writeln!(writer, "Unique cakes: {}", summary.unique_cakes)?;
    writeln!(writer, "Cakes (with repeats): {}", summary.all_cakes)?;
    writer.flush()?;
    Ok(())
}

/// Basic CSV exporter, used for both the cake catalog and the cleaned transactions.
pub(crate) fn write_csv<W: std::io::Write, T: Serialize>(
    writer: W,
    items: &[T],
) -> Result<(), anyhow::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for item in items {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{summarize, unique_by_name},
        data::{LoadOptions, Transaction},
        read::read_transactions,
    };

    const CSV: &[u8] = b"\
TransactionNo,Items,DateTime,DayPart,DayType
1,Cake A,t1,Morning,Weekday
1,Cake A,t1,Morning,Weekday
2,\"Cake, Choco\",t2,Evening,Weekend
3,Cake A,t3,Evening,Weekend
";

    fn loaded() -> Loaded {
        read_transactions(CSV, LoadOptions::default()).unwrap()
    }

    #[test]
    fn test_report() {
        let loaded = loaded();
        let unique = unique_by_name(&loaded.rows);
        let summary = summarize(&loaded.rows, &unique);
        let mut out = Vec::new();
        write_report(&mut out, &loaded, &unique, &summary, 2).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "\
Loaded: 3 | blank skipped: 0 | malformed skipped: 0 | duplicates skipped: 1

=== First 2 transactions ===
1 | Cake A | t1 | Morning | Weekday
2 | Cake, Choco | t2 | Evening | Weekend

=== Unique cakes by name ===
- Cake A
- Cake, Choco

Valid transactions: 3
Unique cakes: 2
Cakes (with repeats): 3
"
        );
    }

    #[test]
    fn test_catalog_csv() {
        let loaded = loaded();
        let mut out = Vec::new();
        write_csv(&mut out, &unique_by_name(&loaded.rows)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Name\nCake A\n\"Cake, Choco\"\n"
        );
    }

    #[test]
    fn test_clean_csv() {
        let rows = vec![Transaction {
            transaction_no: 2,
            items: "Cake, Choco".to_owned(),
            datetime: "t2".to_owned(),
            daypart: "Evening".to_owned(),
            daytype: "Weekend".to_owned(),
        }];
        let mut out = Vec::new();
        write_csv(&mut out, &rows).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "TransactionNo,Items,DateTime,DayPart,DayType\n2,\"Cake, Choco\",t2,Evening,Weekend\n"
        );
    }

    #[test]
    fn test_empty_exports() {
        let mut out = Vec::new();
        write_csv::<_, Cake>(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }
}
