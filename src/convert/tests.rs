use crate::common::error::Error;
use crate::common::style::{Color, ColorSpec, Length, RGBColor};
use crate::convert::{Axis, InsertOutcome, KeepNames, StyleOverrides, TableConverter, TableOptions};
use crate::frame::{DType, DataFrame, DtypeFormat, Index, Value};
use crate::ooxml::pptx::reader::parse_table;
use crate::ooxml::pptx::{
    PlaceholderFormat, PlaceholderType, Presentation, Shape, ShapeGeometry, TableFlags,
};

fn content_placeholder() -> Shape {
    Shape::placeholder(
        3,
        "Content Placeholder 2",
        PlaceholderFormat::new(1, PlaceholderType::Object),
        ShapeGeometry::from_emus(457_200, 1_600_200, 8_229_600, 4_525_963),
    )
}

fn sales() -> DataFrame {
    DataFrame::from_columns(vec![
        ("Units", vec![Value::Int(3), Value::Int(4), Value::Int(5)]),
        ("Price", vec![Value::Float(2.5), Value::Null, Value::Float(1.25)]),
    ])
    .unwrap()
    .with_index(Index::new(["North", "South", "West"]).with_name("Region"))
    .unwrap()
}

fn bare() -> TableOptions {
    TableOptions {
        header: false,
        index: false,
        ..TableOptions::default()
    }
}

fn convert(shape: &mut Shape, data: &DataFrame, options: TableOptions) -> crate::Result<super::Rendered> {
    TableConverter::new(shape, data, options)?.convert()
}

#[test]
fn test_bare_grid_matches_the_data() {
    let data = DataFrame::from_columns(vec![
        ("a", vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        ("b", vec![Value::Int(4), Value::Int(5), Value::Int(6)]),
    ])
    .unwrap();
    let mut shape = content_placeholder();
    let rendered = convert(&mut shape, &data, bare()).unwrap();

    assert_eq!(rendered.insert, InsertOutcome::Inserted);
    assert_eq!(rendered.data.shape(), data.shape());
    let table = shape.table().unwrap();
    assert_eq!(table.texts(), [["1", "4"], ["2", "5"], ["3", "6"]]);
    assert_eq!(table.flags(), TableFlags::BAND_ROW);
}

#[test]
fn test_totals_change_the_grid_size() {
    let data = DataFrame::from_columns(vec![
        ("a", vec![Value::Int(1), Value::Int(2)]),
        ("b", vec![Value::Int(3), Value::Int(4)]),
    ])
    .unwrap();

    let cases = [((true, false), (3, 2)), ((false, true), (2, 3)), ((true, true), (3, 3))];
    for ((column_totals, row_totals), shape) in cases {
        let options = TableOptions {
            column_totals,
            row_totals,
            ..bare()
        };
        let mut target = content_placeholder();
        let rendered = convert(&mut target, &data, options).unwrap();
        assert_eq!(rendered.data.shape(), shape);
        let table = target.table().unwrap();
        assert_eq!((table.row_count(), table.column_count()), shape);
    }

    let options = TableOptions {
        column_totals: true,
        row_totals: true,
        ..bare()
    };
    let mut target = content_placeholder();
    convert(&mut target, &data, options).unwrap();
    assert_eq!(
        target.table().unwrap().texts(),
        [["1", "3", "4"], ["2", "4", "6"], ["3", "7", "10"]]
    );
}

#[test]
fn test_missing_values_total_as_zero_and_render_as_na_rep() {
    let data =
        DataFrame::from_columns(vec![("v", vec![Value::Int(1), Value::Null, Value::Int(3)])]).unwrap();
    let options = TableOptions {
        column_totals: true,
        ..bare()
    };
    let mut shape = content_placeholder();
    let rendered = convert(&mut shape, &data, options).unwrap();

    assert_eq!(shape.table().unwrap().texts(), [["1"], [" "], ["3"], ["4"]]);
    assert!(rendered.data.rows().flatten().all(|v| matches!(v, Value::Text(_))));
}

#[test]
fn test_header_index_and_totals_labels() {
    let options = TableOptions {
        header: true,
        index: true,
        keep_names: KeepNames::Index,
        column_totals: true,
        row_totals: true,
        ..TableOptions::default()
    };
    let mut shape = content_placeholder();
    convert(&mut shape, &sales(), options).unwrap();

    assert_eq!(
        shape.table().unwrap().texts(),
        [
            ["Region", "Units", "Price", "Total"],
            ["North", "3", "2.5", "5.5"],
            ["South", "4", " ", "4"],
            ["West", "5", "1.25", "6.25"],
            ["Total", "12", "3.75", "15.75"],
        ]
    );
}

#[test]
fn test_keep_names_picks_the_corner_label() {
    let data = sales()
        .with_columns(Index::new(["Units", "Price"]).with_name("Metric"))
        .unwrap();
    let corner = |keep_names| {
        let options = TableOptions {
            header: true,
            index: true,
            keep_names,
            ..TableOptions::default()
        };
        let mut shape = content_placeholder();
        convert(&mut shape, &data, options).unwrap();
        shape.table().unwrap().texts()[0][0].clone()
    };
    assert_eq!(corner(KeepNames::Columns), "Metric");
    assert_eq!(corner(KeepNames::Index), "Region");
}

#[test]
fn test_index_runs_are_merged() {
    let data = DataFrame::from_columns(vec![(
        "v",
        (1..=6).map(Value::Int).collect::<Vec<_>>(),
    )])
    .unwrap()
    .with_index(Index::new(["A", "A", "B", "B", "B", "C"]).with_name("Key"))
    .unwrap();
    let options = TableOptions {
        index: true,
        header: false,
        ..TableOptions::default()
    };
    let mut shape = content_placeholder();
    convert(&mut shape, &data, options).unwrap();

    let table = shape.table().unwrap();
    let spans: Vec<(u32, bool)> = (0..6)
        .map(|r| {
            let cell = table.cell(r, 0).unwrap();
            (cell.row_span(), cell.v_merge())
        })
        .collect();
    assert_eq!(
        spans,
        [(2, false), (1, true), (3, false), (1, true), (1, true), (1, false)]
    );
    // bold_index defaults to on
    assert_eq!(
        table.cell(5, 0).unwrap().text_frame().paragraphs()[0].runs[0].font.bold,
        Some(true)
    );

    let xml = shape.to_xml().unwrap();
    assert!(xml.contains(r#"rowSpan="2""#));
    assert!(xml.contains(r#"rowSpan="3""#));
    assert!(xml.contains(r#"vMerge="1""#));
}

#[test]
fn test_header_levels_merge_independently() {
    let columns = Index::from_arrays(vec![
        vec!["2023".into(), "2023".into(), "2024".into()],
        vec!["Q1".into(), "Q2".into(), "Q1".into()],
    ])
    .unwrap();
    let data = DataFrame::from_rows(vec![
        vec![Value::Int(1), Value::Int(2), Value::Int(3)],
        vec![Value::Int(4), Value::Int(5), Value::Int(6)],
    ])
    .unwrap()
    .with_columns(columns)
    .unwrap();
    let options = TableOptions {
        header: true,
        index: false,
        ..TableOptions::default()
    };
    let mut shape = content_placeholder();
    convert(&mut shape, &data, options).unwrap();

    let table = shape.table().unwrap();
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.cell(0, 0).unwrap().grid_span(), 2);
    assert!(table.cell(0, 1).unwrap().h_merge());
    assert_eq!(table.cell(0, 2).unwrap().grid_span(), 1);
    assert!((0..3).all(|c| table.cell(1, c).unwrap().grid_span() == 1));
    // header cells are filled with accent 1 by default
    assert!(table.cell(1, 2).unwrap().fill().is_some());
    assert!(table.cell(2, 0).unwrap().fill().is_none());
}

#[test]
fn test_existing_table_is_kept_without_overwrite() {
    let mut shape = content_placeholder();
    let first = convert(&mut shape, &sales(), bare()).unwrap();
    assert_eq!(first.insert, InsertOutcome::Inserted);
    let before = shape.table().unwrap().clone();

    let other = DataFrame::from_columns(vec![("x", vec![Value::Int(9)])]).unwrap();
    let second = convert(&mut shape, &other, bare()).unwrap();
    assert_eq!(second.insert, InsertOutcome::Skipped);
    assert_eq!(second.data.shape(), (1, 1));
    assert_eq!(shape.table().unwrap(), &before);

    let options = TableOptions {
        overwrite: true,
        ..bare()
    };
    let third = convert(&mut shape, &other, options).unwrap();
    assert_eq!(third.insert, InsertOutcome::Inserted);
    assert_eq!(shape.table().unwrap().texts(), [["9"]]);
}

#[test]
fn test_rendered_grid_survives_the_slide_xml() {
    let data = sales();
    let original = data.clone();
    let options = TableOptions {
        header: true,
        index: true,
        column_totals: true,
        font_size: Some(11.0),
        font_color: Some(ColorSpec::from("#336699")),
        font_name: Some("Calibri".to_string()),
        dtype_format: Some(DtypeFormat::new().with(DType::Float, "{:.2f}")),
        ..TableOptions::default()
    };

    let mut pres = Presentation::new();
    let slide = pres.add_slide("Title and Content").unwrap();
    let rendered = convert(slide.placeholder_mut(1).unwrap(), &data, options).unwrap();
    assert_eq!(data, original);

    let table = slide.placeholder(1).unwrap().table().unwrap();
    let expected: Vec<Vec<String>> = rendered
        .data
        .rows()
        .map(|row| row.iter().map(Value::to_text).collect())
        .collect();
    assert_eq!(table.texts(), expected);
    assert_eq!(table.texts()[1], ["North", "3", "2.50"]);
    assert_eq!(table.texts()[4], ["Total", "12", "3.75"]);

    let font = &table.cell(2, 2).unwrap().text_frame().paragraphs()[0].runs[0].font;
    assert_eq!(font.size, Some(Length::from_pt(11.0)));
    assert_eq!(font.color, Some(Color::Rgb(RGBColor::new(0x33, 0x66, 0x99))));
    assert_eq!(font.name.as_deref(), Some("Calibri"));

    let parsed = parse_table(&slide.to_xml().unwrap()).unwrap();
    assert_eq!(&parsed, table);
}

#[test]
fn test_styling_a_hidden_axis_fails() {
    let mut shape = content_placeholder();
    let data = sales();
    let mut converter = TableConverter::new(&mut shape, &data, bare()).unwrap();
    converter.convert().unwrap();

    let header = StyleOverrides {
        header_font_size: Some(14.0),
        ..StyleOverrides::default()
    };
    assert!(matches!(
        converter.style_table_with(&header),
        Err(Error::InvalidArgument(_))
    ));
    let index = StyleOverrides {
        fill_index: Some(true),
        ..StyleOverrides::default()
    };
    assert!(matches!(
        converter.style_table_with(&index),
        Err(Error::InvalidArgument(_))
    ));

    // plain flag overrides are fine on a bare table
    let flags = StyleOverrides {
        first_row: Some(true),
        row_banding: Some(false),
        ..StyleOverrides::default()
    };
    converter.style_table_with(&flags).unwrap();
    assert_eq!(converter.shape().table().unwrap().flags(), TableFlags::FIRST_ROW);
}

#[test]
fn test_conflicting_options_are_rejected_up_front() {
    let mut shape = content_placeholder();
    let data = sales();
    let options = TableOptions {
        index: false,
        index_font_size: Some(10.0),
        ..TableOptions::default()
    };
    assert!(matches!(
        TableConverter::new(&mut shape, &data, options),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_style_before_insert_fails() {
    let mut shape = content_placeholder();
    let data = sales();
    let mut converter = TableConverter::new(&mut shape, &data, TableOptions::default()).unwrap();
    let style = converter.options().index_style(&StyleOverrides::default());
    assert!(matches!(
        converter.style_index(Axis::Index, &style),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_title_placeholder_cannot_hold_a_table() {
    let mut pres = Presentation::new();
    let slide = pres.add_slide("Title and Content").unwrap();
    let title = slide.placeholder_mut(0).unwrap();
    let err = convert(title, &sales(), bare()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(!slide.placeholder(0).unwrap().has_table());
}

#[test]
fn test_unsupported_label_format_is_reported() {
    let options = TableOptions {
        index: true,
        dtype_format: Some(DtypeFormat::new().with(DType::Text, "{}")),
        ..TableOptions::default()
    };
    let mut shape = content_placeholder();
    let err = convert(&mut shape, &sales(), options).unwrap_err();
    assert!(matches!(err, Error::Unimplemented(_)));
    assert!(!shape.has_table());
}
