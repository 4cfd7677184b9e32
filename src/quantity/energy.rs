quantity!(WattHours, "Wh");
