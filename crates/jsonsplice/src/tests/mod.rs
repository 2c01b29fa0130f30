mod callback_trace;
mod next_fixtures;
mod setf_fixtures;
