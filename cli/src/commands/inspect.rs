use anyhow::Result;
use clap::Args;
use spatia_core::{
    codec::{decode_with_header, DecodeOptions, Endianness, Header},
    geometry::Geometry,
};

use super::{blob_error::IntoBlobError, read_blob};

/// Decode a geometry blob and print a summary
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// The file containing the blob (`-` for standard input)
    #[arg(name = "FILE")]
    pub file: String,

    /// Fail if the MBR in the header does not match the coordinates
    #[arg(long)]
    pub verify_mbr: bool,
}

/// Run the `inspect` command
pub fn run_inspect(args: InspectArgs) -> Result<()> {
    let blob = read_blob(&args.file)?;
    let options = DecodeOptions {
        verify_mbr: args.verify_mbr,
    };
    let (header, geometry) =
        decode_with_header(&blob, &options).map_err(|e| e.into_blob_error(&blob))?;
    print_summary(&header, &geometry, blob.len());
    Ok(())
}

/// Count the points of a geometry, including the points of its members
fn count_points(geometry: &Geometry) -> usize {
    match geometry {
        Geometry::Point(_) => 1,
        Geometry::LineString(g) => g.points().len(),
        Geometry::Polygon(g) => g.rings().iter().map(|r| r.points().len()).sum(),
        Geometry::MultiPoint(g) => g.points().len(),
        Geometry::MultiLineString(g) => g.line_strings().iter().map(|l| l.points().len()).sum(),
        Geometry::MultiPolygon(g) => g
            .polygons()
            .iter()
            .flat_map(|p| p.rings())
            .map(|r| r.points().len())
            .sum(),
        Geometry::GeometryCollection(g) => g.geometries().iter().map(count_points).sum(),
    }
}

fn count_members(geometry: &Geometry) -> Option<usize> {
    match geometry {
        Geometry::Point(_) | Geometry::LineString(_) => None,
        Geometry::Polygon(g) => Some(g.rings().len()),
        Geometry::MultiPoint(g) => Some(g.points().len()),
        Geometry::MultiLineString(g) => Some(g.line_strings().len()),
        Geometry::MultiPolygon(g) => Some(g.polygons().len()),
        Geometry::GeometryCollection(g) => Some(g.geometries().len()),
    }
}

/// Print the header information and some statistics about the geometry
pub(crate) fn print_summary(header: &Header, geometry: &Geometry, len: usize) {
    let byte_order = match header.byte_order {
        Endianness::Little => "little-endian",
        Endianness::Big => "big-endian",
    };
    let mbr = header.mbr;

    println!("Type:       {}", header.geometry_type);
    println!("SRID:       {}", header.srid);
    println!("Byte order: {byte_order}");
    println!(
        "MBR:        ({} {}) - ({} {})",
        mbr.min_x, mbr.min_y, mbr.max_x, mbr.max_y
    );
    if let Some(members) = count_members(geometry) {
        let label = match geometry {
            Geometry::Polygon(_) => "Rings:     ",
            _ => "Members:   ",
        };
        println!("{label} {members}");
    }
    println!("Points:     {}", count_points(geometry));
    println!("Size:       {len} bytes");
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, EqualityAssertion, OptionAssertion};
    use spatia_core::geometry::{
        Geometry, GeometryCollection, LineString, MultiPoint, Point, Polygon,
    };

    use super::{count_members, count_points};

    fn ring() -> LineString {
        LineString::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn point_has_no_members() {
        let point: Geometry = Point::new(1.0, 2.0).into();
        assert_that!(count_points(&point)).is_equal_to(1);
        assert_that!(count_members(&point)).is_none();
    }

    #[test]
    fn polygon_counts_rings() {
        let polygon: Geometry = Polygon::new(vec![ring(), ring()]).unwrap().into();
        assert_that!(count_points(&polygon)).is_equal_to(8);
        assert_that!(count_members(&polygon)).is_equal_to(Some(2));
    }

    #[test]
    fn collection_counts_nested_points() {
        let gc: Geometry = GeometryCollection::new(vec![
            Point::new(1.0, 2.0).into(),
            ring().into(),
            Polygon::from_exterior(ring()).unwrap().into(),
        ])
        .unwrap()
        .into();
        assert_that!(count_points(&gc)).is_equal_to(9);
        assert_that!(count_members(&gc)).is_equal_to(Some(3));

        let mp: Geometry = MultiPoint::new(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)])
            .unwrap()
            .into();
        assert_that!(count_members(&mp)).is_equal_to(Some(2));
    }
}
