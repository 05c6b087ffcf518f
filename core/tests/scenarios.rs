use assertor::{assert_that, EqualityAssertion, ResultAssertion};
use pretty_assertions::assert_eq;
use spatia_core::{
    codec::{decode, decode_multi_polygon, encode, encoded_len, DecodeError, DecodeErrorKind},
    geometry::{
        Geometry, GeometryCollection, LineString, Mbr, MultiPoint, MultiPolygon, Point, Polygon,
        ValidationError,
    },
};

const A: (f64, f64) = (-122.080699, 37.426734);
const B: (f64, f64) = (-122.084801, 37.422131);
const C: (f64, f64) = (-122.088006, 37.418401);

fn line(coords: &[(f64, f64)]) -> LineString {
    LineString::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
}

fn round_trip(geometry: &Geometry) {
    let blob = encode(geometry).unwrap();
    assert_that!(blob.len()).is_equal_to(encoded_len(geometry));
    assert_eq!(&decode(&blob).unwrap(), geometry);
}

#[test]
fn point() {
    let point = Point::new(B.0, B.1);
    round_trip(&point.into());
    assert_that!(point.mbr()).is_equal_to(Mbr::new(B.0, B.1, B.0, B.1, 4326));
}

#[test]
fn line_string() {
    let ls = line(&[A, B, C]);
    round_trip(&ls.clone().into());

    let mbr = ls.mbr();
    assert_that!((mbr.min_x, mbr.min_y)).is_equal_to(C);
    assert_that!((mbr.max_x, mbr.max_y)).is_equal_to(A);
}

#[test]
fn polygon() {
    let polygon = Polygon::from_exterior(line(&[A, B, C, A])).unwrap();
    round_trip(&polygon.into());

    assert_eq!(
        Polygon::from_exterior(line(&[A, B, C])),
        Err(ValidationError::UnclosedRing { ring: 0 })
    );
}

#[test]
fn multi_polygon_of_two_triangles() {
    let first = Polygon::from_exterior(line(&[A, B, C, A])).unwrap();
    let second = Polygon::from_exterior(line(&[A, C, B, A])).unwrap();
    let mp = MultiPolygon::new(vec![first.clone(), second.clone()]).unwrap();

    let blob = encode(&mp.clone().into()).unwrap();
    let decoded = decode_multi_polygon(&blob).unwrap();
    assert_eq!(decoded.polygons(), &[first, second]);
    assert_eq!(decoded, mp);
}

#[test]
fn geometry_collection() {
    let mut geometries: Vec<Geometry> = vec![
        Point::new(B.0, B.1).into(),
        line(&[A, B, C, A]).into(),
        Polygon::from_exterior(line(&[A, C, B, A])).unwrap().into(),
    ];
    let gc = GeometryCollection::new(geometries.clone()).unwrap();
    round_trip(&gc.into());

    geometries.push(MultiPoint::new(vec![Point::new(A.0, A.1)]).unwrap().into());
    assert_that!(GeometryCollection::new(geometries)).is_err();
}

#[test]
fn mixed_srids() {
    let result = MultiPoint::new(vec![
        Point::with_srid(A.0, A.1, 4326),
        Point::with_srid(B.0, B.1, 3857),
    ]);
    assert_eq!(
        result,
        Err(ValidationError::MixedSrids {
            srids: vec![4326, 3857]
        })
    );
}

#[test]
fn corrupted_end_marker() {
    let mut blob = encode(&line(&[A, B, C]).into()).unwrap();
    let last = blob.len() - 1;
    blob[last] = 0x00;
    assert_eq!(
        decode(&blob),
        Err(DecodeError::new(DecodeErrorKind::EndMarker(0x00), last))
    );
}
