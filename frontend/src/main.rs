fn main() {
    expense_tracker_frontend::start();
}
