use blizzard_basin::*;

fn main() {
    let args: Args = Args::parse();
    let input_file_path: &str = args.input_file_path("input/day24.txt");

    if let Err(err) =
        // SAFETY: This operation is unsafe, we're just hoping nobody else touches the file while
        // this program is executing
        unsafe {
            open_utf8_file(
                input_file_path,
                |input: &str| match PeriodicField::try_from(input) {
                    Ok(field) => {
                        let search: TimeIndexedSearch = TimeIndexedSearch::new(&field);

                        dbg!(search.fewest_ticks_to_finish());
                        dbg!(search.fewest_ticks_with_return_trip());
                    }
                    Err(error) => {
                        panic!("{error:#?}")
                    }
                },
            )
        }
    {
        eprintln!(
            "Encountered error {} when opening file \"{}\"",
            err, input_file_path
        );
    }
}
