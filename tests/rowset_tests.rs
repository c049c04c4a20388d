//! RowSet and TableSet tests: passes, processors, dicts, and text ingestion


use messy_core::cell::{Cell, Row};
use messy_core::config::IngestConfig;
use messy_core::schema::TypeTag;
use messy_core::types::Scalar;
use messy_rows::{
    ApplyHeaders, CoerceTypes, Error, FilterRows, MapRows, MemoryTableSet, Pass, PerPass,
    ProcessorContext, RowProcessor, RowSet, SkipRows, TableSet, TextTableSet,
};
use std::io::Cursor;
use test_data_gen::{first_ints, id_name_rows};

fn collect(rows: impl Iterator<Item = messy_rows::Result<Row>>) -> Vec<Row> {
    rows.collect::<messy_rows::Result<_>>().expect("rows")
}

/// Vetoes every third row it sees, counting from the start of each pass.
#[derive(Default)]
struct EveryThird {
    seen: PerPass<usize>,
}

impl RowProcessor for EveryThird {
    fn name(&self) -> &'static str {
        "every_third"
    }

    fn process(
        &mut self,
        ctx: &ProcessorContext<'_>,
        row: Row,
    ) -> messy_rows::Result<Option<Row>> {
        let seen = self.seen.get_mut(ctx.pass);
        *seen += 1;
        Ok((*seen % 3 != 0).then_some(row))
    }

    fn reset(&mut self, pass: Pass) {
        self.seen.reset(pass);
    }
}

#[test]
fn test_veto_every_third_row() {
    let mut set = RowSet::from_rows("t", id_name_rows(9));
    set.register_processor(EveryThird::default());
    let rows = collect(set.rows());
    assert_eq!(first_ints(&rows), vec![0, 1, 3, 4, 6, 7]);
}

#[test]
fn test_sample_twice_matches_regardless_of_main_pass() {
    let mut set = RowSet::from_rows("t", id_name_rows(20)).with_window(5);
    set.register_processor(EveryThird::default());

    let first = collect(set.sample());
    let main_head = collect(set.rows().take(2));
    let second = collect(set.sample());
    assert_eq!(first, second);
    assert_eq!(first_ints(&first), vec![0, 1, 3, 4]);
    assert_eq!(first_ints(&main_head), vec![0, 1]);
}

#[test]
fn test_sample_between_main_reads_keeps_main_state() {
    let mut set = RowSet::from_rows("t", id_name_rows(9)).with_window(5);
    set.register_processor(EveryThird::default());

    let mut main = collect(set.rows().take(1));
    assert_eq!(first_ints(&collect(set.sample())), vec![0, 1, 3, 4]);
    main.extend(collect(set.rows()));
    assert_eq!(first_ints(&main), vec![0, 1, 3, 4, 6, 7]);
}

#[test]
fn test_main_pass_continues_past_sample_window() {
    let mut set = RowSet::from_rows("t", id_name_rows(50)).with_window(10);
    assert_eq!(collect(set.sample()).len(), 10);
    let all = collect(set.rows());
    assert_eq!(first_ints(&all), (0..50).collect::<Vec<i64>>());
}

#[test]
fn test_dicts_follow_header_order() {
    let mut set = RowSet::from_rows("people", id_name_rows(3));
    set.register_processor(ApplyHeaders::new(["id", "name"]));
    let dicts: Vec<_> = set
        .dicts(false)
        .collect::<messy_rows::Result<_>>()
        .expect("dicts");
    assert_eq!(dicts.len(), 3);
    for dict in &dicts {
        assert_eq!(dict.columns().collect::<Vec<_>>(), vec![Some("id"), Some("name")]);
    }
    assert_eq!(dicts[2].get("name"), Some(&Scalar::from("name-2")));
    assert_eq!(
        serde_json::to_value(&dicts[0]).expect("json"),
        serde_json::json!({"id": "0", "name": "name-0"})
    );
}

#[test]
fn test_header_skip_then_typed_coercion() {
    let rows: Vec<Row> = [["id", "score"], ["1", "2.5"], ["2", "n/a"]]
        .iter()
        .map(|r| r.iter().map(|v| Cell::new(Scalar::from(*v))).collect())
        .collect();
    let mut set = RowSet::from_rows("scores", rows);
    set.set_types(vec![TypeTag::Integer, TypeTag::Float]);
    set.register_processor(SkipRows::new(1));
    set.register_processor(CoerceTypes::lenient());

    let out = collect(set.sample());
    assert_eq!(out.len(), 2);
    assert_eq!(out[0][0].value, Some(Scalar::I64(1)));
    assert_eq!(out[0][1].value, Some(Scalar::F64(2.5)));
    assert_eq!(out[1][1].value, Some(Scalar::from("n/a")));
    assert_eq!(out[1][1].type_tag, TypeTag::String);

    // The main pass restarts the skip counter.
    assert_eq!(collect(set.rows()).len(), 2);
}

#[test]
fn test_strict_coercion_aborts_the_pass() {
    let rows = vec![
        vec![Cell::new(Scalar::from("1"))],
        vec![Cell::new(Scalar::from("x"))],
        vec![Cell::new(Scalar::from("3"))],
    ];
    let mut set = RowSet::from_rows("t", rows);
    set.set_types(vec![TypeTag::Integer]);
    set.register_processor(CoerceTypes::strict());

    let results: Vec<_> = set.rows().collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::Core(_))));
}

#[test]
fn test_cell_emptiness() {
    assert!(Cell::new(None).is_empty());
    assert!(Cell::new(Scalar::from(" \t ")).is_empty());
    assert!(!Cell::new(Scalar::from("x")).is_empty());
    assert!(!Cell::new(Scalar::I64(0)).is_empty());
}

#[test]
fn test_memory_table_set_lookup() {
    let mut tables = MemoryTableSet::new()
        .with_table("first", id_name_rows(2))
        .with_table("second", id_name_rows(4));
    assert_eq!(tables.table_names().expect("names"), vec!["first", "second"]);
    assert_eq!(tables.tables().expect("tables").len(), 2);
    let second = tables.table("second").expect("second");
    assert_eq!(collect(second.rows()).len(), 4);
    assert!(matches!(tables.table("third"), Err(Error::UnknownTable(name)) if name == "third"));
}

#[test]
fn test_text_table_set_end_to_end() {
    let bytes = b"\xEF\xBB\xBFid,name\r\n1,alice\r2,bob\n3,carol".to_vec();
    let cfg = IngestConfig {
        buffer_capacity: 8,
        sample_window: 2,
        chunk_size: 3,
    };
    let mut tables =
        TextTableSet::new(Cursor::new(bytes), "people.txt", &cfg).expect("table set");
    let table = tables.table("people.txt").expect("table");
    assert_eq!(table.window(), 2);

    table.register_processor(SkipRows::new(1));
    table.register_processor(MapRows::new(|row: Row| {
        let line = row[0]
            .value
            .as_ref()
            .and_then(Scalar::as_str)
            .unwrap_or_default()
            .to_string();
        line.split(',').map(|v| Cell::new(Scalar::from(v))).collect()
    }));
    table.register_processor(ApplyHeaders::new(["id", "name"]));
    table.register_processor(FilterRows::new(|row: &Row| !row.iter().all(Cell::is_empty)));

    let sample = collect(table.sample());
    assert_eq!(sample.len(), 1);

    let names: Vec<String> = table
        .dicts(false)
        .map(|d| d.expect("dict").get("name").map(|v| v.to_string()).unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);
}
